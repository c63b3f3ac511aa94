mod config;
mod plan_file;

pub use config::{Config, LoggingConfig, PlanningConfig};
pub use plan_file::PlanFile;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/examplan[-dev]/` based on EXAMPLAN_ENV.
///
/// Set EXAMPLAN_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("EXAMPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("examplan-dev")
    } else {
        base_dir.join("examplan")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
