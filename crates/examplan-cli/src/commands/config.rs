//! Configuration commands: read and edit `config.toml`.

use clap::Subcommand;
use examplan_core::Config;

use super::CommandResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value
    Get {
        /// Dot-separated key, e.g. "planning.max_planned_sessions"
        key: String,
    },
    /// Change one value and save; the quota range is re-checked
    Set {
        /// Dot-separated key
        key: String,
        /// New value
        value: String,
    },
    /// Print the whole file
    List {
        #[arg(long)]
        json: bool,
    },
    /// Restore the defaults
    Reset,
}

pub fn run(action: ConfigAction) -> CommandResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
            let planning = &config.planning;
            if key.starts_with("planning.") {
                println!(
                    "New subjects get {} sessions, allowed {}..={}",
                    planning.default_planned_sessions,
                    planning.min_planned_sessions,
                    planning.max_planned_sessions
                );
            }
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("Config reset to defaults: {}", Config::path()?.display());
        }
    }
    Ok(())
}
