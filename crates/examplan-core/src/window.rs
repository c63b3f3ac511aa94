//! Study window derived from the subject list.
//!
//! The window length scales with the number of subjects (2.5 days each,
//! rounded half up, then clamped to 15..=21). It ends on the latest exam
//! and starts `window_days` before the earliest one. Sessions may be
//! placed up to the day before the earliest exam.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{add_days, days_between};
use crate::subject::Subject;

pub const MIN_WINDOW_DAYS: u32 = 15;
pub const MAX_WINDOW_DAYS: u32 = 21;

/// Date bounds for a plan. All dates are `None` until some subject has an
/// exam date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyWindow {
    pub window_days: u32,
    pub session_days: u32,
    pub start_date: Option<NaiveDate>,
    pub placement_deadline: Option<NaiveDate>,
    pub earliest_exam_date: Option<NaiveDate>,
    pub latest_exam_date: Option<NaiveDate>,
}

impl StudyWindow {
    pub fn compute(subjects: &[Subject]) -> Self {
        let window_days = Self::window_days_for(subjects.len());
        let exam_dates = subjects.iter().filter_map(|s| s.exam_date);
        let earliest = exam_dates.clone().min();
        let latest = exam_dates.max();

        Self {
            window_days,
            session_days: window_days.saturating_sub(1).max(1),
            // window_days <= 21, so the cast cannot truncate
            start_date: earliest.map(|d| add_days(d, -(window_days as i32))),
            placement_deadline: earliest.map(|d| add_days(d, -1)),
            earliest_exam_date: earliest,
            latest_exam_date: latest,
        }
    }

    /// `clamp(round(count * 2.5), 15, 21)` with halves rounded up.
    pub fn window_days_for(subject_count: usize) -> u32 {
        // round(n * 2.5) == (5n + 1) / 2 for non-negative n
        let rounded = subject_count.saturating_mul(5).saturating_add(1) / 2;
        rounded.clamp(MIN_WINDOW_DAYS as usize, MAX_WINDOW_DAYS as usize) as u32
    }

    pub fn is_defined(&self) -> bool {
        self.start_date.is_some()
    }

    /// Whether `date` is on or before the placement deadline.
    pub fn is_placeable(&self, date: NaiveDate) -> bool {
        self.placement_deadline.is_some_and(|deadline| date <= deadline)
    }

    /// Every calendar day from the start date through the latest exam.
    pub fn calendar_days(&self) -> Vec<NaiveDate> {
        match (self.start_date, self.latest_exam_date) {
            (Some(start), Some(end)) => days_between(start, end),
            _ => Vec::new(),
        }
    }
}

/// Subjects whose exam falls on `date`.
pub fn exams_on(subjects: &[Subject], date: NaiveDate) -> Vec<&Subject> {
    subjects.iter().filter(|s| s.exam_date == Some(date)).collect()
}

/// Subjects whose exam is the day after `date`; `date` is their review day.
pub fn review_subjects(subjects: &[Subject], date: NaiveDate) -> Vec<&Subject> {
    match date.succ_opt() {
        Some(next) => exams_on(subjects, next),
        None => Vec::new(),
    }
}

/// Whether `date` is the eve of any subject's exam.
pub fn is_exam_eve(subjects: &[Subject], date: NaiveDate) -> bool {
    !review_subjects(subjects, date).is_empty()
}
