pub mod config;
pub mod mastery;
pub mod note;
pub mod outline;
pub mod progress;
pub mod session;
pub mod show;
pub mod subject;
pub mod window;

use chrono::NaiveDate;
use examplan_core::{Config, PlanError, PlanFile, Planner};
use std::path::Path;
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// A plan loaded from disk for the duration of one command.
pub struct Workspace {
    pub planner: Planner,
    file: PlanFile,
}

impl Workspace {
    /// Load the plan at `plan`, or the configured plan file.
    pub fn open(plan: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let file = match plan {
            Some(path) => PlanFile::at(path),
            None => PlanFile::open_default(&config)?,
        };
        let snapshot = file.load()?;
        debug!(path = %file.path().display(), version = snapshot.version, "plan loaded");
        Ok(Self {
            planner: Planner::from_snapshot(snapshot, config.planning),
            file,
        })
    }

    /// Write the plan back if anything was committed.
    pub fn save(&mut self) -> CommandResult {
        let events = self.planner.drain_events();
        if events.is_empty() {
            return Ok(());
        }
        for event in &events {
            debug!(?event, "committed");
        }
        self.file.save(&self.planner.snapshot())?;
        Ok(())
    }

    /// Subject id for an id or exact name.
    pub fn subject_id(&self, key: &str) -> Result<String, PlanError> {
        self.planner
            .resolve_subject(key)
            .map(|s| s.id.clone())
            .ok_or_else(|| PlanError::SubjectNotFound {
                subject_id: key.to_string(),
            })
    }

    /// Full id of the session on `date` that `key` names, either exactly or
    /// as a unique prefix. Unmatched keys come back as given.
    pub fn entry_id(&self, date: NaiveDate, key: &str) -> String {
        let entries = self.planner.schedule().entries_on(date);
        if entries.iter().any(|e| e.id == key) {
            return key.to_string();
        }
        let mut matches = entries.iter().filter(|e| e.id.starts_with(key));
        match (matches.next(), matches.next()) {
            (Some(entry), None) if !key.is_empty() => entry.id.clone(),
            _ => key.to_string(),
        }
    }

    /// Print every invariant the plan currently breaks.
    pub fn warn_violations(&self) {
        for violation in self.planner.audit() {
            eprintln!("warning: {violation}");
        }
    }
}

/// Short form of an id for listings.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
