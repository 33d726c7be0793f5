// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer identifiers.
//!
//! Each trigger kind owns at most one timer per stage (alarm, jitter,
//! chain step, cooldown), so the id doubles as the replace-on-set key in
//! the scheduler.

use crate::trigger::TriggerKind;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Key of one scheduled timer, `stage:kind` shaped (e.g. `jitter:check-in`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub String);

impl TimerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Timer ID for the daily wall-clock alarm of a trigger kind.
    pub fn alarm(kind: TriggerKind) -> Self {
        Self::new(format!("alarm:{}", kind))
    }

    /// Timer ID for the randomized pre-execution delay of a trigger kind.
    pub fn jitter(kind: TriggerKind) -> Self {
        Self::new(format!("jitter:{}", kind))
    }

    /// Timer ID for a chain step of an in-flight attempt.
    pub fn chain(kind: TriggerKind, step: usize) -> Self {
        Self::new(format!("chain:{}:{}", kind, step))
    }

    /// Timer ID for the guard-release cooldown after an attempt.
    pub fn cooldown(kind: TriggerKind) -> Self {
        Self::new(format!("cooldown:{}", kind))
    }

    /// Returns true if this is an alarm timer.
    pub fn is_alarm(&self) -> bool {
        self.0.starts_with("alarm:")
    }

    /// Returns true if this is a jitter timer.
    pub fn is_jitter(&self) -> bool {
        self.0.starts_with("jitter:")
    }

    /// Returns true if this is a chain step timer.
    pub fn is_chain(&self) -> bool {
        self.0.starts_with("chain:")
    }

    /// Returns true if this is a cooldown timer.
    pub fn is_cooldown(&self) -> bool {
        self.0.starts_with("cooldown:")
    }

    /// Extracts the trigger kind encoded in this id, if any.
    pub fn kind(&self) -> Option<TriggerKind> {
        let rest = self.0.split_once(':')?.1;
        // Chain ids carry a trailing step index
        let kind_str = rest.split(':').next()?;
        TriggerKind::parse(kind_str)
    }

    /// Extracts the chain step index from a `chain:` id.
    pub fn chain_step(&self) -> Option<usize> {
        let rest = self.0.strip_prefix("chain:")?;
        rest.rsplit(':').next()?.parse().ok()
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TimerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TimerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for TimerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TimerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for TimerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
