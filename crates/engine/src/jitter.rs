// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Randomized pre-execution delay.
//!
//! Scheduled clock actions run a uniformly random number of seconds after
//! their configured time so the execution timestamp is not exactly
//! predictable day over day.

use rand::Rng;
use std::time::Duration;

/// Pick a delay uniformly from `[0, max_secs]` inclusive.
///
/// A bound of 0 always yields a zero delay (the trigger runs immediately,
/// without a timer suspension).
pub fn pick_delay<R: Rng + ?Sized>(max_secs: u32, rng: &mut R) -> Duration {
    if max_secs == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs(u64::from(rng.random_range(0..=max_secs)))
}

#[cfg(test)]
#[path = "jitter_tests.rs"]
mod tests;
