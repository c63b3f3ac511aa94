//! The schedule map: calendar date -> sessions placed on that date.
//!
//! Position within a day is placement order, and together with the date
//! it defines the chronological session order used for outline chunks.
//! Dates with no sessions are never stored, so an emptied day and a day
//! that was never used compare equal.

mod audit;

pub use audit::{audit, Violation};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::subject::{SessionEntry, Subject};

/// Most sessions a single day may hold.
pub const MAX_SESSIONS_PER_DAY: usize = 3;

type Days = BTreeMap<NaiveDate, Vec<SessionEntry>>;

/// Date-keyed, ordered session lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Days", into = "Days")]
pub struct ScheduleMap {
    days: Days,
}

impl From<Days> for ScheduleMap {
    fn from(mut days: Days) -> Self {
        days.retain(|_, entries| !entries.is_empty());
        Self { days }
    }
}

impl From<ScheduleMap> for Days {
    fn from(map: ScheduleMap) -> Self {
        map.days
    }
}

impl ScheduleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions on `date`, in placement order.
    pub fn entries_on(&self, date: NaiveDate) -> &[SessionEntry] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of placed sessions.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Occupied dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Occupied days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[SessionEntry])> {
        self.days.iter().map(|(date, entries)| (*date, entries.as_slice()))
    }

    /// Every session with its date, by date then position within the day.
    pub fn ordered_entries(&self) -> impl Iterator<Item = (NaiveDate, &SessionEntry)> {
        self.days
            .iter()
            .flat_map(|(date, entries)| entries.iter().map(move |entry| (*date, entry)))
    }

    /// Number of sessions placed for a subject across all dates.
    pub fn used_count(&self, subject_id: &str) -> usize {
        self.ordered_entries()
            .filter(|(_, entry)| entry.subject_id == subject_id)
            .count()
    }

    /// Sessions still placeable for `subject`; never negative.
    pub fn remaining_quota(&self, subject: &Subject) -> u32 {
        let used = u32::try_from(self.used_count(&subject.id)).unwrap_or(u32::MAX);
        subject.planned_sessions.saturating_sub(used)
    }

    /// `(date, position)` of each session of a subject, chronologically.
    pub fn positions_of(&self, subject_id: &str) -> Vec<(NaiveDate, usize)> {
        self.days
            .iter()
            .flat_map(|(date, entries)| {
                entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.subject_id == subject_id)
                    .map(move |(idx, _)| (*date, idx))
            })
            .collect()
    }

    /// Earliest and latest occupied dates.
    pub fn occupied_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.days.keys().next()?;
        let last = self.days.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn has_subject_on(&self, date: NaiveDate, subject_id: &str) -> bool {
        self.entries_on(date).iter().any(|e| e.subject_id == subject_id)
    }

    /// Locate a session by id anywhere in the map.
    pub fn find(&self, entry_id: &str) -> Option<(NaiveDate, &SessionEntry)> {
        self.ordered_entries().find(|(_, entry)| entry.id == entry_id)
    }

    pub(crate) fn position_on(&self, date: NaiveDate, entry_id: &str) -> Option<usize> {
        self.entries_on(date).iter().position(|e| e.id == entry_id)
    }

    pub(crate) fn push(&mut self, date: NaiveDate, entry: SessionEntry) {
        self.days.entry(date).or_default().push(entry);
    }

    /// Remove the session at `idx` on `date`, dropping the day if it empties.
    pub(crate) fn remove_at(&mut self, date: NaiveDate, idx: usize) -> Option<SessionEntry> {
        let entries = self.days.get_mut(&date)?;
        if idx >= entries.len() {
            return None;
        }
        let entry = entries.remove(idx);
        if entries.is_empty() {
            self.days.remove(&date);
        }
        Some(entry)
    }

    pub(crate) fn entry_mut(&mut self, date: NaiveDate, idx: usize) -> Option<&mut SessionEntry> {
        self.days.get_mut(&date)?.get_mut(idx)
    }
}
