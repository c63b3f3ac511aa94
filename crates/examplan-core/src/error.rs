//! Core error types for examplan-core.
//!
//! Domain constraint violations (`PlanError`) are ordinary, recoverable
//! results: the engine refuses the mutation and leaves the schedule as it
//! was. Malformed input (`ValidationError`) indicates a caller bug.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for examplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A placement or adjustment was refused
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Malformed caller input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Constraint violations reported by the placement engine and adjuster.
///
/// Each variant names the rule that refused the operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("subject '{subject_id}' not found")]
    SubjectNotFound { subject_id: String },

    /// `deadline` is `None` when no subject has an exam date yet.
    #[error("{}", after_deadline_message(.date, .deadline))]
    DateAfterDeadline {
        date: NaiveDate,
        deadline: Option<NaiveDate>,
    },

    #[error("{date} is the day before an exam; only review is allowed")]
    ExamEveBlackout { date: NaiveDate },

    #[error("{date} already holds {max} sessions")]
    DayCapacityExceeded { date: NaiveDate, max: usize },

    #[error("all {planned} planned sessions of '{subject_id}' are already placed")]
    SubjectQuotaExceeded { subject_id: String, planned: u32 },

    #[error("no session '{entry_id}' on {date}")]
    EntryNotFound { date: NaiveDate, entry_id: String },
}

fn after_deadline_message(date: &NaiveDate, deadline: &Option<NaiveDate>) -> String {
    match deadline {
        Some(deadline) => format!("{date} is after the placement deadline {deadline}"),
        None => format!("cannot place on {date}: no exam date is set"),
    }
}

/// Validation errors for malformed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: u32,
        len: u32,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key not present in the configuration
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home or data directory unavailable
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_message_mentions_missing_exam_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let err = PlanError::DateAfterDeadline {
            date,
            deadline: None,
        };
        assert!(err.to_string().contains("no exam date"));

        let err = PlanError::DateAfterDeadline {
            date,
            deadline: NaiveDate::from_ymd_opt(2025, 5, 30),
        };
        assert!(err.to_string().contains("2025-05-30"));
    }

    #[test]
    fn plan_error_is_transparent_in_core_error() {
        let err: CoreError = PlanError::SubjectNotFound {
            subject_id: "math".into(),
        }
        .into();
        assert_eq!(err.to_string(), "subject 'math' not found");
    }
}
