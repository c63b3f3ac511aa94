//! Plan data model: subjects, placed sessions, outlines and day notes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::color::PastelColor;

/// Subject id -> raw multi-line outline text.
pub type Outlines = BTreeMap<String, String>;

/// Free-text memos per calendar day.
pub type DayNotes = BTreeMap<NaiveDate, DayNote>;

/// A subject with an optional exam date and a session quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exam_date: Option<NaiveDate>,
    /// Maximum number of sessions this subject may have placed.
    pub planned_sessions: u32,
}

impl Subject {
    /// Create a subject with a fresh id.
    pub fn new(name: impl Into<String>, exam_date: Option<NaiveDate>, planned_sessions: u32) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), name, exam_date, planned_sessions)
    }

    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        exam_date: Option<NaiveDate>,
        planned_sessions: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            exam_date,
            planned_sessions,
        }
    }

    /// Display color seeded by the subject name.
    pub fn color(&self) -> PastelColor {
        PastelColor::of(&self.name)
    }
}

/// Look up a subject by id.
pub fn find_subject<'a>(subjects: &'a [Subject], subject_id: &str) -> Option<&'a Subject> {
    subjects.iter().find(|s| s.id == subject_id)
}

/// One placed study session.
///
/// `name` is the subject name at placement time and is not kept in sync
/// with later renames. `scope` is written only by the outline distributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub id: String,
    pub subject_id: String,
    pub name: String,
    #[serde(default)]
    pub scope: String,
}

impl SessionEntry {
    /// A fresh, unscoped entry for `subject`.
    pub fn new(subject: &Subject) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            subject_id: subject.id.clone(),
            name: subject.name.clone(),
            scope: String::new(),
        }
    }

    pub fn color(&self) -> PastelColor {
        PastelColor::of(&self.name)
    }
}

/// Academy schedule and homework memo for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayNote {
    #[serde(default)]
    pub academy: String,
    #[serde(default)]
    pub homework: String,
}

impl DayNote {
    pub fn is_empty(&self) -> bool {
        self.academy.trim().is_empty() && self.homework.trim().is_empty()
    }
}
