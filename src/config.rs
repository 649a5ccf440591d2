use std::time::Duration;

use thiserror::Error;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("timeout must be a positive number of seconds")]
    ZeroTimeout,
}

/// Knobs shared by every probe of a single validation.
///
/// Only the STARTTLS stage honours `timeout_secs`; DNS lookups and the `dig`
/// invocation keep the system defaults.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerConfig {
    pub timeout_secs: u64,
    pub verbose: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verbose: false,
        }
    }
}

impl CheckerConfig {
    pub fn new(timeout_secs: u64, verbose: bool) -> Result<Self, ConfigError> {
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            timeout_secs,
            verbose,
        })
    }

    /// Like [`CheckerConfig::new`] but falls back to the default timeout
    /// instead of failing. Used for loosely typed inputs (query strings).
    pub fn lenient(timeout_secs: Option<u64>, verbose: bool) -> Self {
        let timeout_secs = timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            timeout_secs,
            verbose,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
