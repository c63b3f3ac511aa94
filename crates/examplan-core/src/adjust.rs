//! Post-hoc editing of placed sessions.
//!
//! Moves are clamped to the occupied range (the earliest and latest dates
//! that currently hold any session), not to the study window, so a
//! session can never be pushed past the edge of the plan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dates::add_days;
use crate::error::PlanError;
use crate::schedule::{ScheduleMap, MAX_SESSIONS_PER_DAY};
use crate::subject::SessionEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved { from: NaiveDate, to: NaiveDate },
    /// Clamping landed on the source date.
    Unchanged { date: NaiveDate },
}

pub struct Adjuster;

impl Adjuster {
    /// `date + delta_days`, clamped into `bounds` when given.
    pub fn shift_date(date: NaiveDate, delta_days: i32, bounds: Option<(NaiveDate, NaiveDate)>) -> NaiveDate {
        let next = add_days(date, delta_days);
        match bounds {
            Some((min, max)) if min <= max => next.clamp(min, max),
            _ => next,
        }
    }

    /// Move a session by `delta_days`, clamped to the occupied range.
    ///
    /// # Errors
    ///
    /// [`PlanError::EntryNotFound`] if `entry_id` is not on `date`;
    /// [`PlanError::DayCapacityExceeded`] if the destination is full.
    pub fn move_entry(
        map: &mut ScheduleMap,
        date: NaiveDate,
        entry_id: &str,
        delta_days: i32,
    ) -> Result<MoveOutcome, PlanError> {
        let bounds = map.occupied_range();
        Self::move_within(map, date, entry_id, delta_days, bounds)
    }

    /// Move a session by `delta_days`, clamped to explicit bounds.
    pub fn move_within(
        map: &mut ScheduleMap,
        date: NaiveDate,
        entry_id: &str,
        delta_days: i32,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<MoveOutcome, PlanError> {
        let destination = Self::shift_date(date, delta_days, bounds);

        let Some(idx) = map.position_on(date, entry_id) else {
            debug!(%date, entry_id, "move refused: entry not found");
            return Err(PlanError::EntryNotFound {
                date,
                entry_id: entry_id.to_string(),
            });
        };

        if destination == date {
            return Ok(MoveOutcome::Unchanged { date });
        }

        if map.entries_on(destination).len() >= MAX_SESSIONS_PER_DAY {
            debug!(%date, %destination, entry_id, "move refused: destination full");
            return Err(PlanError::DayCapacityExceeded {
                date: destination,
                max: MAX_SESSIONS_PER_DAY,
            });
        }

        if let Some(entry) = map.remove_at(date, idx) {
            map.push(destination, entry);
        }
        info!(from = %date, to = %destination, entry_id, "session moved");
        Ok(MoveOutcome::Moved {
            from: date,
            to: destination,
        })
    }

    /// Remove a session; absent sessions are a no-op.
    pub fn remove(map: &mut ScheduleMap, date: NaiveDate, entry_id: &str) -> Option<SessionEntry> {
        let idx = map.position_on(date, entry_id)?;
        let removed = map.remove_at(date, idx);
        if removed.is_some() {
            info!(%date, entry_id, "session removed");
        }
        removed
    }
}
