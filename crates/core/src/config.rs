// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule configuration and its flat TOML persistence.
//!
//! The configuration is the only persisted state in the system: two daily
//! times, an enabled flag, the jitter bound, and the target/host app ids.
//! No schema versioning; a missing file yields the defaults.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors from loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid time \"{0}\": expected HH:MM with hour < 24 and minute < 60")]
    InvalidTime(String),
}

/// A validated 24h wall-clock time (hour/minute pair).
///
/// Serializes as the string "HH:MM" so the config file reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Construct a validated time. Fails if hour >= 24 or minute >= 60.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ConfigError> {
        if hour >= 24 || minute >= 60 {
            return Err(ConfigError::InvalidTime(format!("{}:{}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The chrono representation, for alarm arithmetic.
    pub fn naive(&self) -> NaiveTime {
        // Fields are validated at construction, so this cannot be None
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or_default()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Persisted schedule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Daily check-in time
    pub check_in: ClockTime,
    /// Daily check-out time
    pub check_out: ClockTime,
    /// Whether the daily alarms are armed
    pub enabled: bool,
    /// Upper bound (inclusive) on the randomized pre-execution delay
    pub max_jitter_secs: u32,
    /// App id of the application to launch for the clock action
    pub target_app: String,
    /// App id of the application to return to afterwards
    pub host_app: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            check_in: ClockTime { hour: 9, minute: 0 },
            check_out: ClockTime {
                hour: 18,
                minute: 0,
            },
            enabled: false,
            max_jitter_secs: 60,
            target_app: "dingtalk".to_string(),
            host_app: "punch".to_string(),
        }
    }
}

impl ScheduleConfig {
    /// The configured time for a scheduled trigger kind.
    ///
    /// Manual test triggers have no wall-clock time; they return None.
    pub fn time_for(&self, kind: crate::trigger::TriggerKind) -> Option<ClockTime> {
        match kind {
            crate::trigger::TriggerKind::CheckIn => Some(self.check_in),
            crate::trigger::TriggerKind::CheckOut => Some(self.check_out),
            crate::trigger::TriggerKind::Test => None,
        }
    }

    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        Ok(toml::from_str(&contents)?)
    }

    /// Persist as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.display().to_string(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
