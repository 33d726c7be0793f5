// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side effects the runtime asks the executor to perform.

use crate::event::Event;
use crate::timer::TimerId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the engine does to the outside world, as data. Handlers
/// return these; only the executor touches adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Feed an event back into the engine loop
    Emit { event: Event },

    /// Arm (or replace) a timer
    SetTimer {
        id: TimerId,
        #[serde(with = "duration_serde")]
        duration: Duration,
    },

    CancelTimer { id: TimerId },

    /// Launch an application by app id
    LaunchApp { app: String },

    /// Bring an already-running application to the foreground
    FocusApp { app: String },

    /// Hold a sleep inhibitor for at most `max_hold`
    AcquireWakeLock {
        #[serde(with = "duration_serde")]
        max_hold: Duration,
    },

    ReleaseWakeLock,

    /// Post a desktop notification
    Notify { title: String, message: String },
}

impl crate::traced::TracedEffect for Effect {
    fn name(&self) -> &'static str {
        match self {
            Effect::Emit { .. } => "emit",
            Effect::SetTimer { .. } => "set_timer",
            Effect::CancelTimer { .. } => "cancel_timer",
            Effect::LaunchApp { .. } => "launch_app",
            Effect::FocusApp { .. } => "focus_app",
            Effect::AcquireWakeLock { .. } => "acquire_wake_lock",
            Effect::ReleaseWakeLock => "release_wake_lock",
            Effect::Notify { .. } => "notify",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Emit { event } => vec![("event", event.log_summary())],
            Effect::SetTimer { id, duration } => vec![
                ("timer_id", id.to_string()),
                ("duration_ms", duration.as_millis().to_string()),
            ],
            Effect::CancelTimer { id } => vec![("timer_id", id.to_string())],
            Effect::LaunchApp { app } => vec![("app", app.clone())],
            Effect::FocusApp { app } => vec![("app", app.clone())],
            Effect::AcquireWakeLock { max_hold } => {
                vec![("max_hold_ms", max_hold.as_millis().to_string())]
            }
            Effect::ReleaseWakeLock => vec![],
            Effect::Notify { title, .. } => vec![("title", title.clone())],
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
        duration.as_millis().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
