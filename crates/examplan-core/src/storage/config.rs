//! TOML-based application configuration.
//!
//! Stores planning defaults (quota range for new subjects, the
//! recommended daily load), the log filter and an optional plan file
//! override.
//!
//! Configuration is stored at `~/.config/examplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Planning defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    #[serde(default = "default_planned_sessions")]
    pub default_planned_sessions: u32,
    #[serde(default = "default_min_planned_sessions")]
    pub min_planned_sessions: u32,
    #[serde(default = "default_max_planned_sessions")]
    pub max_planned_sessions: u32,
    /// Average sessions per placeable day above which the plan is flagged.
    #[serde(default = "default_recommended_daily_load")]
    pub recommended_daily_load: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/examplan/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Plan file override; defaults to `plan.json` in the data directory.
    #[serde(default)]
    pub plan_file: Option<String>,
    #[serde(default)]
    pub planning: PlanningConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_planned_sessions() -> u32 {
    4
}
fn default_min_planned_sessions() -> u32 {
    4
}
fn default_max_planned_sessions() -> u32 {
    8
}
fn default_recommended_daily_load() -> f64 {
    2.5
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            default_planned_sessions: default_planned_sessions(),
            min_planned_sessions: default_min_planned_sessions(),
            max_planned_sessions: default_max_planned_sessions(),
            recommended_daily_load: default_recommended_daily_load(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl PlanningConfig {
    /// Clamp a requested quota into the configured range.
    pub fn clamp_planned(&self, requested: u32) -> u32 {
        let lo = self.min_planned_sessions.min(self.max_planned_sessions);
        requested.clamp(lo, self.max_planned_sessions)
    }

    /// Check that the quota range is ordered, holds the default quota, and
    /// that the recommended load is a positive number.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| {
            Err(ConfigError::InvalidValue {
                key: format!("planning.{key}"),
                message,
            })
        };
        if self.min_planned_sessions > self.max_planned_sessions {
            return invalid(
                "min_planned_sessions",
                format!(
                    "{} is above max_planned_sessions ({})",
                    self.min_planned_sessions, self.max_planned_sessions
                ),
            );
        }
        if !(self.min_planned_sessions..=self.max_planned_sessions).contains(&self.default_planned_sessions) {
            return invalid(
                "default_planned_sessions",
                format!(
                    "{} is outside {}..={}",
                    self.default_planned_sessions, self.min_planned_sessions, self.max_planned_sessions
                ),
            );
        }
        if !(self.recommended_daily_load.is_finite() && self.recommended_daily_load > 0.0) {
            return invalid(
                "recommended_daily_load",
                format!("{} is not a positive number", self.recommended_daily_load),
            );
        }
        Ok(())
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Default location of the config file.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// See [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key. Unset optional
    /// values read as an empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::Null => Some(String::new()),
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not fit
    /// the existing type, or the planning range would become invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.planning.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.planning.default_planned_sessions, 4);
        assert_eq!(parsed.logging.filter, "warn");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[planning]\nmax_planned_sessions = 10\n").unwrap();
        assert_eq!(parsed.planning.max_planned_sessions, 10);
        assert_eq!(parsed.planning.min_planned_sessions, 4);
        assert!(parsed.plan_file.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("planning.max_planned_sessions").as_deref(), Some("8"));
        assert_eq!(cfg.get("planning.recommended_daily_load").as_deref(), Some("2.5"));
        assert_eq!(cfg.get("logging.filter").as_deref(), Some("warn"));
        assert!(cfg.get("planning.missing_key").is_none());
        assert_eq!(cfg.get("plan_file").as_deref(), Some(""));
    }

    #[test]
    fn set_updates_numbers_and_strings() {
        let mut cfg = Config::default();
        cfg.set("planning.default_planned_sessions", "6").unwrap();
        cfg.set("planning.recommended_daily_load", "3").unwrap();
        cfg.set("logging.filter", "examplan_core=debug").unwrap();
        cfg.set("plan_file", "/tmp/plan.json").unwrap();
        assert_eq!(cfg.planning.default_planned_sessions, 6);
        assert_eq!(cfg.planning.recommended_daily_load, 3.0);
        assert_eq!(cfg.logging.filter, "examplan_core=debug");
        assert_eq!(cfg.plan_file.as_deref(), Some("/tmp/plan.json"));
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_types() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("planning.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("planning.max_planned_sessions", "many"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_keeps_the_planning_range_consistent() {
        let mut cfg = Config::default();
        let err = cfg.set("planning.min_planned_sessions", "9").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "planning.min_planned_sessions"
        ));
        assert!(cfg.set("planning.default_planned_sessions", "10").is_err());
        assert!(cfg.set("planning.recommended_daily_load", "0").is_err());
        assert_eq!(cfg, Config::default());

        cfg.set("planning.max_planned_sessions", "12").unwrap();
        cfg.set("planning.default_planned_sessions", "10").unwrap();
        cfg.set("planning.min_planned_sessions", "9").unwrap();
        assert_eq!(cfg.planning.clamp_planned(4), 9);
        assert!(cfg.planning.validate().is_ok());
    }

    #[test]
    fn clamp_planned_uses_configured_range() {
        let planning = PlanningConfig::default();
        assert_eq!(planning.clamp_planned(1), 4);
        assert_eq!(planning.clamp_planned(6), 6);
        assert_eq!(planning.clamp_planned(20), 8);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("planning.max_planned_sessions", "9").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().planning.max_planned_sessions, 9);
    }

    #[test]
    fn load_from_reports_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "planning = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
    }
}
