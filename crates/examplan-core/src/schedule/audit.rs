//! Post-hoc invariant checks.
//!
//! The engine keeps every invariant while it places and moves sessions,
//! but editing a subject afterwards (an earlier exam date, a smaller
//! quota, deleting it) can leave existing placements in breach. `audit`
//! reports those so the controller can surface them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ScheduleMap, MAX_SESSIONS_PER_DAY};
use crate::subject::{find_subject, Subject};
use crate::window::{is_exam_eve, StudyWindow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    AfterDeadline { date: NaiveDate, entry_id: String },
    ExamEve { date: NaiveDate, entry_id: String },
    OverCapacity { date: NaiveDate, count: usize },
    OverQuota { subject_id: String, placed: usize, planned: u32 },
    Orphaned { date: NaiveDate, entry_id: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::AfterDeadline { date, entry_id } => {
                write!(f, "session {entry_id} on {date} is after the placement deadline")
            }
            Violation::ExamEve { date, entry_id } => {
                write!(f, "session {entry_id} on {date} falls on an exam eve")
            }
            Violation::OverCapacity { date, count } => {
                write!(f, "{date} holds {count} sessions (max {MAX_SESSIONS_PER_DAY})")
            }
            Violation::OverQuota {
                subject_id,
                placed,
                planned,
            } => write!(f, "subject {subject_id} has {placed} sessions placed but plans {planned}"),
            Violation::Orphaned { date, entry_id } => {
                write!(f, "session {entry_id} on {date} belongs to a removed subject")
            }
        }
    }
}

/// Every invariant breach in `map` under the current subjects.
pub fn audit(map: &ScheduleMap, subjects: &[Subject]) -> Vec<Violation> {
    let window = StudyWindow::compute(subjects);
    let mut violations = Vec::new();

    for (date, entries) in map.days() {
        if entries.len() > MAX_SESSIONS_PER_DAY {
            violations.push(Violation::OverCapacity {
                date,
                count: entries.len(),
            });
        }
        let eve = is_exam_eve(subjects, date);
        for entry in entries {
            if !window.is_placeable(date) {
                violations.push(Violation::AfterDeadline {
                    date,
                    entry_id: entry.id.clone(),
                });
            }
            if eve {
                violations.push(Violation::ExamEve {
                    date,
                    entry_id: entry.id.clone(),
                });
            }
            if find_subject(subjects, &entry.subject_id).is_none() {
                violations.push(Violation::Orphaned {
                    date,
                    entry_id: entry.id.clone(),
                });
            }
        }
    }

    for subject in subjects {
        let placed = map.used_count(&subject.id);
        if placed > subject.planned_sessions as usize {
            violations.push(Violation::OverQuota {
                subject_id: subject.id.clone(),
                placed,
                planned: subject.planned_sessions,
            });
        }
    }

    violations
}
