//! Read-only summaries for the view layer: workload, subject picker and
//! per-subject progress.

use serde::{Deserialize, Serialize};

use crate::color::PastelColor;
use crate::mastery::MasteryBoard;
use crate::schedule::ScheduleMap;
use crate::subject::Subject;
use crate::window::StudyWindow;

/// Planned sessions spread over the placeable days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    pub total_planned: u32,
    pub session_days: u32,
    pub average_per_day: f64,
    pub within_recommended: bool,
}

impl Workload {
    pub fn compute(subjects: &[Subject], window: &StudyWindow, recommended_daily_load: f64) -> Self {
        let total_planned = subjects
            .iter()
            .map(|s| s.planned_sessions)
            .fold(0u32, u32::saturating_add);
        let average_per_day = if window.session_days > 0 {
            f64::from(total_planned) / f64::from(window.session_days)
        } else {
            0.0
        };
        Self {
            total_planned,
            session_days: window.session_days,
            average_per_day,
            within_recommended: average_per_day <= recommended_daily_load,
        }
    }
}

/// Quota usage of one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject_id: String,
    pub name: String,
    pub color: PastelColor,
    pub planned: u32,
    pub placed: usize,
    pub remaining: u32,
    pub mastered: u32,
}

impl SubjectProgress {
    pub fn of(subject: &Subject, map: &ScheduleMap, mastery: &MasteryBoard) -> Self {
        Self {
            subject_id: subject.id.clone(),
            name: subject.name.clone(),
            color: subject.color(),
            planned: subject.planned_sessions,
            placed: map.used_count(&subject.id),
            remaining: map.remaining_quota(subject),
            mastered: mastery.mastered_count(subject),
        }
    }
}

/// Progress rows in subject order.
pub fn progress(subjects: &[Subject], map: &ScheduleMap, mastery: &MasteryBoard) -> Vec<SubjectProgress> {
    subjects
        .iter()
        .map(|s| SubjectProgress::of(s, map, mastery))
        .collect()
}

/// Progress rows with the most remaining quota first; ties keep subject
/// order.
pub fn picker_order(subjects: &[Subject], map: &ScheduleMap, mastery: &MasteryBoard) -> Vec<SubjectProgress> {
    let mut rows = progress(subjects, map, mastery);
    rows.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::SessionEntry;
    use chrono::NaiveDate;

    #[test]
    fn workload_against_recommendation() {
        let subjects = vec![
            Subject::with_id("a", "A", None, 8),
            Subject::with_id("b", "B", None, 8),
            Subject::with_id("c", "C", None, 8),
            Subject::with_id("d", "D", None, 8),
            Subject::with_id("e", "E", None, 8),
        ];
        let window = StudyWindow::compute(&subjects);
        let load = Workload::compute(&subjects, &window, 2.5);
        assert_eq!(load.total_planned, 40);
        assert_eq!(load.session_days, 14);
        assert!(load.average_per_day > 2.8);
        assert!(!load.within_recommended);

        let light = Workload::compute(&subjects[..2], &window, 2.5);
        assert!(light.within_recommended);
    }

    #[test]
    fn huge_restored_quotas_saturate() {
        let subjects = vec![
            Subject::with_id("a", "A", None, u32::MAX),
            Subject::with_id("b", "B", None, 3),
        ];
        let window = StudyWindow::compute(&subjects);
        let load = Workload::compute(&subjects, &window, 2.5);
        assert_eq!(load.total_planned, u32::MAX);
        assert!(!load.within_recommended);
    }

    #[test]
    fn picker_sorts_by_remaining_stably() {
        let subjects = vec![
            Subject::with_id("a", "A", None, 4),
            Subject::with_id("b", "B", None, 6),
            Subject::with_id("c", "C", None, 4),
        ];
        let mut map = ScheduleMap::new();
        map.push(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), SessionEntry::new(&subjects[2]));

        let rows = picker_order(&subjects, &map, &MasteryBoard::new());
        let ids: Vec<_> = rows.iter().map(|r| r.subject_id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(rows[2].placed, 1);
        assert_eq!(rows[2].remaining, 3);
    }
}
