//! Click-to-place session engine.
//!
//! `add` either places a new session for a subject on a date or, when
//! that subject already has a session there, toggles the last one off.
//! Checks run in a fixed order and the first failing rule wins:
//!
//! 1. the subject must exist
//! 2. the date must be on or before the placement deadline
//! 3. the date must not be the eve of any exam
//! 4. an existing session of the subject on that date is toggled off
//! 5. the day must have room (at most three sessions)
//! 6. the subject must have quota left
//!
//! A refused operation leaves the schedule untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::error::PlanError;
use crate::schedule::{ScheduleMap, MAX_SESSIONS_PER_DAY};
use crate::subject::{find_subject, SessionEntry, Subject};
use crate::window::{is_exam_eve, StudyWindow};

/// Non-blocking notice attached to a successful placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The same subject is also placed on the previous day.
    ConsecutiveDay {
        subject_id: String,
        previous: NaiveDate,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ConsecutiveDay { previous, .. } => {
                write!(f, "same subject is also placed on the previous day ({previous})")
            }
        }
    }
}

/// Outcome of a successful `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Placed {
        entry_id: String,
        advisory: Option<Advisory>,
    },
    /// The subject already had a session on the date; it was removed.
    ToggledOff { entry: SessionEntry },
}

impl Placement {
    pub fn advisory(&self) -> Option<&Advisory> {
        match self {
            Placement::Placed { advisory, .. } => advisory.as_ref(),
            Placement::ToggledOff { .. } => None,
        }
    }
}

pub struct PlacementEngine;

impl PlacementEngine {
    /// Place or toggle a session of `subject_id` on `date`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanError`] whose rule the request breaks; the
    /// map is unchanged in that case.
    pub fn add(
        map: &mut ScheduleMap,
        subjects: &[Subject],
        date: NaiveDate,
        subject_id: &str,
    ) -> Result<Placement, PlanError> {
        debug!(%date, subject_id, "placement requested");
        let result = Self::apply(map, subjects, date, subject_id);
        if let Err(err) = &result {
            debug!(%date, subject_id, error = %err, "placement refused");
        }
        result
    }

    fn apply(
        map: &mut ScheduleMap,
        subjects: &[Subject],
        date: NaiveDate,
        subject_id: &str,
    ) -> Result<Placement, PlanError> {
        let subject = find_subject(subjects, subject_id).ok_or_else(|| PlanError::SubjectNotFound {
            subject_id: subject_id.to_string(),
        })?;

        let window = StudyWindow::compute(subjects);
        if !window.is_placeable(date) {
            return Err(PlanError::DateAfterDeadline {
                date,
                deadline: window.placement_deadline,
            });
        }

        if is_exam_eve(subjects, date) {
            return Err(PlanError::ExamEveBlackout { date });
        }

        let existing = map
            .entries_on(date)
            .iter()
            .rposition(|entry| entry.subject_id == subject_id);
        if let Some(idx) = existing {
            if let Some(entry) = map.remove_at(date, idx) {
                info!(%date, subject_id, entry_id = %entry.id, "session toggled off");
                return Ok(Placement::ToggledOff { entry });
            }
        }

        if map.entries_on(date).len() >= MAX_SESSIONS_PER_DAY {
            return Err(PlanError::DayCapacityExceeded {
                date,
                max: MAX_SESSIONS_PER_DAY,
            });
        }

        if map.remaining_quota(subject) == 0 {
            return Err(PlanError::SubjectQuotaExceeded {
                subject_id: subject_id.to_string(),
                planned: subject.planned_sessions,
            });
        }

        let advisory = date
            .pred_opt()
            .filter(|previous| map.has_subject_on(*previous, subject_id))
            .map(|previous| Advisory::ConsecutiveDay {
                subject_id: subject_id.to_string(),
                previous,
            });

        let entry = SessionEntry::new(subject);
        let entry_id = entry.id.clone();
        map.push(date, entry);
        info!(%date, subject_id, %entry_id, consecutive = advisory.is_some(), "session placed");

        Ok(Placement::Placed { entry_id, advisory })
    }
}
