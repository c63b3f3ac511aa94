//! JSON dump of a plan snapshot, so the CLI can carry state between runs.
//!
//! Stored at `~/.config/examplan/plan.json` unless the config names
//! another path.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::{data_dir, Config};
use crate::error::Result;
use crate::planner::PlanSnapshot;

pub struct PlanFile {
    path: PathBuf,
}

impl PlanFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configured plan file, or `plan.json` in the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable.
    pub fn open_default(config: &Config) -> Result<Self> {
        let path = match &config.plan_file {
            Some(path) => PathBuf::from(path),
            None => data_dir()?.join("plan.json"),
        };
        Ok(Self::at(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot; a missing file is an empty plan.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<PlanSnapshot> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no plan file yet");
            return Ok(PlanSnapshot::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Write the snapshot through a sibling temp file and rename.
    ///
    /// # Errors
    /// Returns an error if serialization or any filesystem step fails.
    pub fn save(&self, snapshot: &PlanSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), version = snapshot.version, "plan saved");
        Ok(())
    }
}
