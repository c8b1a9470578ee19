use crate::error::ConfigError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const POLL_INTERVAL_ENV: &str = "CFNWATCH_POLL_INTERVAL_MS";
pub const LOOK_BACK_ENV: &str = "CFNWATCH_LOOK_BACK_SECS";

// ---------------------------------------------------------------------------
// WatchConfig
// ---------------------------------------------------------------------------

/// Runtime knobs shared by every watcher in the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Interval of the shared rate limiter, i.e. the aggregate pace of
    /// `DescribeStackEvents` calls across all watched stacks.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// How far back the root watcher's cursor starts.
    #[serde(default = "default_look_back_secs")]
    pub look_back_secs: u64,
}

fn default_poll_interval_ms() -> u64 {
    550
}

fn default_look_back_secs() -> u64 {
    30 * 60
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            look_back_secs: default_look_back_secs(),
        }
    }
}

impl WatchConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the known
    /// variables. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(ms) = read_u64(&lookup, POLL_INTERVAL_ENV)? {
            config.poll_interval_ms = ms;
        }
        if let Some(secs) = read_u64(&lookup, LOOK_BACK_ENV)? {
            config.look_back_secs = secs;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Zero(POLL_INTERVAL_ENV));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn look_back(&self) -> Duration {
        Duration::from_secs(self.look_back_secs)
    }

    /// Starting cursor for the root watcher.
    pub fn initial_cursor(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        chrono::Duration::from_std(self.look_back())
            .ok()
            .and_then(|back| now.checked_sub_signed(back))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

fn read_u64<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::NotANumber {
            var,
            value: raw.to_string(),
        })
}
