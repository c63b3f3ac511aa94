//! Self-assessed mastery cells.
//!
//! Each subject has one cell per planned session. The student marks a
//! cell only once the material is fully understood; the board carries no
//! link to specific placed sessions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::ValidationError;
use crate::subject::Subject;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasteryBoard {
    cells: BTreeMap<String, BTreeSet<u32>>,
}

impl MasteryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip cell `index` of `subject`; returns the new state.
    ///
    /// # Errors
    ///
    /// [`ValidationError::OutOfBounds`] when `index` is not below the
    /// subject's planned session count.
    pub fn toggle(&mut self, subject: &Subject, index: u32) -> Result<bool, ValidationError> {
        if index >= subject.planned_sessions {
            return Err(ValidationError::OutOfBounds {
                collection: format!("mastery cells of '{}'", subject.name),
                index,
                len: subject.planned_sessions,
            });
        }
        let cells = self.cells.entry(subject.id.clone()).or_default();
        let mastered = if cells.remove(&index) {
            false
        } else {
            cells.insert(index);
            true
        };
        if cells.is_empty() {
            self.cells.remove(&subject.id);
        }
        Ok(mastered)
    }

    pub fn is_mastered(&self, subject_id: &str, index: u32) -> bool {
        self.cells.get(subject_id).is_some_and(|cells| cells.contains(&index))
    }

    /// Marked cells below the subject's current planned count.
    ///
    /// Cells marked before the quota was lowered are kept but not counted.
    pub fn mastered_count(&self, subject: &Subject) -> u32 {
        self.cells
            .get(&subject.id)
            .map(|cells| cells.range(..subject.planned_sessions).count() as u32)
            .unwrap_or(0)
    }

    /// One flag per planned session of `subject`.
    pub fn row(&self, subject: &Subject) -> Vec<bool> {
        (0..subject.planned_sessions)
            .map(|i| self.is_mastered(&subject.id, i))
            .collect()
    }

    pub fn forget_subject(&mut self, subject_id: &str) {
        self.cells.remove(subject_id);
    }
}
