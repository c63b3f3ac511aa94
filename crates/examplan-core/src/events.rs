use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::placement::Advisory;

/// Every committed change to a plan produces an Event.
/// The controller queues them; views and exporters drain the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlanEvent {
    SessionPlaced {
        date: NaiveDate,
        entry_id: String,
        subject_id: String,
        #[serde(default)]
        advisory: Option<Advisory>,
        at: DateTime<Utc>,
    },
    SessionToggledOff {
        date: NaiveDate,
        entry_id: String,
        subject_id: String,
        at: DateTime<Utc>,
    },
    SessionMoved {
        entry_id: String,
        from: NaiveDate,
        to: NaiveDate,
        at: DateTime<Utc>,
    },
    SessionRemoved {
        date: NaiveDate,
        entry_id: String,
        at: DateTime<Utc>,
    },
    /// Scopes were rewritten as a consequence of the preceding change.
    ScopesReassigned {
        rewritten: usize,
        at: DateTime<Utc>,
    },
    SubjectChanged {
        subject_id: String,
        at: DateTime<Utc>,
    },
    SubjectRemoved {
        subject_id: String,
        at: DateTime<Utc>,
    },
    OutlineChanged {
        subject_id: String,
        at: DateTime<Utc>,
    },
    NoteChanged {
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    MasteryToggled {
        subject_id: String,
        index: u32,
        mastered: bool,
        at: DateTime<Utc>,
    },
}

impl PlanEvent {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            PlanEvent::SessionPlaced { at, .. }
            | PlanEvent::SessionToggledOff { at, .. }
            | PlanEvent::SessionMoved { at, .. }
            | PlanEvent::SessionRemoved { at, .. }
            | PlanEvent::ScopesReassigned { at, .. }
            | PlanEvent::SubjectChanged { at, .. }
            | PlanEvent::SubjectRemoved { at, .. }
            | PlanEvent::OutlineChanged { at, .. }
            | PlanEvent::NoteChanged { at, .. }
            | PlanEvent::MasteryToggled { at, .. } => *at,
        }
    }
}
