// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event types for the punch system

use crate::config::ScheduleConfig;
use crate::timer::TimerId;
use crate::trigger::{AttemptOutcome, TriggerKind};
use serde::{Deserialize, Serialize};

/// Events that drive state transitions in the engine.
///
/// Serializes with `{"type": "event:name", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A scheduler timer reached its deadline
    #[serde(rename = "timer:fired")]
    TimerFired { id: TimerId },

    /// Something requested a clock-action run.
    ///
    /// `jitter_applied` tells the engine whether the randomized delay was
    /// already consumed upstream (alarm path) or still needs to be applied
    /// (manual test path).
    #[serde(rename = "trigger:requested")]
    TriggerRequested {
        kind: TriggerKind,
        #[serde(default)]
        jitter_applied: bool,
    },

    /// The persisted configuration changed; alarms must be re-armed
    #[serde(rename = "config:changed")]
    ConfigChanged { config: ScheduleConfig },

    /// A guarded attempt reached its terminal step
    #[serde(rename = "attempt:finished")]
    AttemptFinished {
        kind: TriggerKind,
        outcome: AttemptOutcome,
    },

    /// Stop the daemon
    #[serde(rename = "shutdown")]
    Shutdown,
}

impl Event {
    /// Short human-readable summary for log lines.
    pub fn log_summary(&self) -> String {
        match self {
            Event::TimerFired { id } => format!("timer:fired {}", id),
            Event::TriggerRequested {
                kind,
                jitter_applied,
            } => format!("trigger:requested {} (jitter_applied={})", kind, jitter_applied),
            Event::ConfigChanged { config } => {
                format!("config:changed (enabled={})", config.enabled)
            }
            Event::AttemptFinished { kind, outcome } => {
                format!("attempt:finished {} ({})", kind, outcome)
            }
            Event::Shutdown => "shutdown".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
