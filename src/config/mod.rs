use std::time::Duration;

use crate::errors::{FeedhoundError, FeedhoundResult};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.3; rv:36.0) Gecko/20100101 Firefox/36.0";
pub const DEFAULT_OPEN_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub open_timeout: Duration,
    pub read_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open_timeout: Duration::from_secs(DEFAULT_OPEN_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeedhoundResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> FeedhoundResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let open_timeout = parse_secs(
            "FEEDHOUND_OPEN_TIMEOUT",
            lookup("FEEDHOUND_OPEN_TIMEOUT"),
            DEFAULT_OPEN_TIMEOUT_SECS,
        )?;
        let read_timeout = parse_secs(
            "FEEDHOUND_READ_TIMEOUT",
            lookup("FEEDHOUND_READ_TIMEOUT"),
            DEFAULT_READ_TIMEOUT_SECS,
        )?;
        let user_agent = lookup("FEEDHOUND_USER_AGENT")
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            open_timeout,
            read_timeout,
            user_agent,
        })
    }
}

fn parse_secs(key: &str, value: Option<String>, default: u64) -> FeedhoundResult<Duration> {
    match value {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| FeedhoundError::Config(format!("{} must be whole seconds, got '{}'", key, raw))),
    }
}
