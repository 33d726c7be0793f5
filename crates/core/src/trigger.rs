// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger kinds and attempt outcomes.
//!
//! A trigger is a request (scheduled or manual) that a clock-action run.
//! An attempt outcome records how a single guarded run ended.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of trigger requesting a clock-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Morning check-in, fired by the daily alarm
    CheckIn,
    /// Evening check-out, fired by the daily alarm
    CheckOut,
    /// Manual trigger from the CLI
    Test,
}

impl TriggerKind {
    /// Stable string form used in timer ids and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::CheckIn => "check-in",
            TriggerKind::CheckOut => "check-out",
            TriggerKind::Test => "test",
        }
    }

    /// Parse the stable string form produced by `as_str`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "check-in" => Some(TriggerKind::CheckIn),
            "check-out" => Some(TriggerKind::CheckOut),
            "test" => Some(TriggerKind::Test),
            _ => None,
        }
    }

    /// Human-readable label for notifications ("check-in clock action").
    pub fn label(&self) -> String {
        format!("{} clock action", self.as_str())
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a guarded execution attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Target launched and the host was brought back to the foreground
    Completed,
    /// Target application is not installed; nothing was launched
    TargetMissing,
    /// Target application is installed but launching it failed
    LaunchFailed,
    /// Target launched but both return-to-host methods failed
    ReturnFailed,
}

impl AttemptOutcome {
    /// True only for a fully successful attempt.
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Completed)
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttemptOutcome::Completed => "completed",
            AttemptOutcome::TargetMissing => "target missing",
            AttemptOutcome::LaunchFailed => "launch failed",
            AttemptOutcome::ReturnFailed => "return failed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
