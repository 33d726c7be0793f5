// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight execution guard.
//!
//! At most one clock-action may be in flight, from "launch target" through
//! "returned to host and settled". Triggers that arrive while the guard is
//! busy are dropped, never queued: triggers are infrequent (twice daily plus
//! manual tests) and a missed duplicate is not a correctness failure.
//!
//! State machine: `Idle -> Running -> Cooldown -> Idle`. Transitions happen
//! only through [`ExecutionGuard::try_begin`], [`ExecutionGuard::finish`] and
//! [`ExecutionGuard::release`].

use crate::trigger::TriggerKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Current phase of the execution guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GuardState {
    /// No attempt in flight
    Idle,
    /// An attempt is executing its action chain
    Running { kind: TriggerKind },
    /// The last attempt finished; waiting out the release delay
    Cooldown { kind: TriggerKind },
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardState::Idle => write!(f, "idle"),
            GuardState::Running { kind } => write!(f, "running ({})", kind),
            GuardState::Cooldown { kind } => write!(f, "cooling down ({})", kind),
        }
    }
}

/// Rejection returned when a trigger arrives while the guard is busy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{current} already in progress ({phase})")]
pub struct GuardBusy {
    /// Kind of the attempt currently holding the guard
    pub current: TriggerKind,
    /// "running" or "cooling down"
    pub phase: &'static str,
}

/// Owner of the single-flight state machine.
#[derive(Debug, Clone, Default)]
pub struct ExecutionGuard {
    state: GuardState,
}

impl Default for GuardState {
    fn default() -> Self {
        GuardState::Idle
    }
}

impl ExecutionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Kind of the attempt holding the guard, if any.
    pub fn current(&self) -> Option<TriggerKind> {
        match self.state {
            GuardState::Idle => None,
            GuardState::Running { kind } | GuardState::Cooldown { kind } => Some(kind),
        }
    }

    /// `Idle -> Running`: claim the guard for a new attempt.
    ///
    /// A busy guard rejects the trigger without altering the stored kind
    /// (drop-newest policy).
    pub fn try_begin(&mut self, kind: TriggerKind) -> Result<(), GuardBusy> {
        match self.state {
            GuardState::Idle => {
                self.state = GuardState::Running { kind };
                Ok(())
            }
            GuardState::Running { kind: current } => Err(GuardBusy {
                current,
                phase: "running",
            }),
            GuardState::Cooldown { kind: current } => Err(GuardBusy {
                current,
                phase: "cooling down",
            }),
        }
    }

    /// `Running -> Cooldown`: the attempt's chain reached a terminal step.
    ///
    /// Returns false (and leaves the state unchanged) if the guard was not
    /// running; callers log this as a stray-timer warning.
    pub fn finish(&mut self) -> bool {
        match self.state {
            GuardState::Running { kind } => {
                self.state = GuardState::Cooldown { kind };
                true
            }
            _ => false,
        }
    }

    /// `Cooldown -> Idle`: the release delay elapsed.
    ///
    /// Returns false (and leaves the state unchanged) if the guard was not
    /// cooling down.
    pub fn release(&mut self) -> bool {
        match self.state {
            GuardState::Cooldown { .. } => {
                self.state = GuardState::Idle;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
