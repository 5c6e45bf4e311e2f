use std::path::PathBuf;

pub const LOG_DIR_ENV: &str = "ROLEPLAN_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "ROLEPLAN_LOG";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime settings taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Reads the settings, falling back to defaults for anything unset.
    ///
    /// The log directory is resolved in this order:
    /// 1. `ROLEPLAN_LOG_DIR` environment variable.
    /// 2. `~/.local/share/roleplan/logs` (on Linux).
    /// 3. `./logs` (fallback).
    pub fn from_env() -> Config {
        let log_dir = std::env::var(LOG_DIR_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        Config { log_dir, log_level }
    }
}

fn default_log_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(mut p) => {
            p.push("roleplan");
            p.push("logs");
            p
        }
        None => PathBuf::from("./logs"),
    }
}
