// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer and scheduling management.
//!
//! Timers are keyed by [`TimerId`]; setting a timer with an id that is
//! already registered replaces the old deadline, so re-arming an alarm never
//! stacks duplicate schedules for the same trigger kind.

use punch_core::{Event, TimerId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One pending deadline
#[derive(Debug, Clone)]
struct Timer {
    fires_at: Instant,
}

/// The timer map: every pending deadline, keyed for replace-on-set
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: HashMap<TimerId, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) a timer
    pub fn set_timer(&mut self, id: TimerId, duration: Duration, now: Instant) {
        let fires_at = now + duration;
        self.timers.insert(id, Timer { fires_at });
    }

    pub fn cancel_timer(&mut self, id: &TimerId) {
        self.timers.remove(id);
    }

    /// Cancel all timers whose id matches a prefix
    pub fn cancel_timers_with_prefix(&mut self, prefix: &str) {
        self.timers.retain(|id, _| !id.as_str().starts_with(prefix));
    }

    /// Drain every timer whose deadline has passed, as fired events
    pub fn fired_timers(&mut self, now: Instant) -> Vec<Event> {
        let mut events = Vec::new();
        let mut to_remove = Vec::new();

        for (id, timer) in &self.timers {
            if timer.fires_at <= now {
                events.push(Event::TimerFired { id: id.clone() });
                to_remove.push(id.clone());
            }
        }

        for id in to_remove {
            self.timers.remove(&id);
        }

        events
    }

    /// Get the deadline of a specific timer, if registered
    pub fn deadline(&self, id: &TimerId) -> Option<Instant> {
        self.timers.get(id).map(|t| t.fires_at)
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.fires_at).min()
    }

    /// All registered timers with their deadlines, earliest first
    pub fn deadlines(&self) -> Vec<(TimerId, Instant)> {
        let mut entries: Vec<_> = self
            .timers
            .iter()
            .map(|(id, t)| (id.clone(), t.fires_at))
            .collect();
        entries.sort_by_key(|(_, fires_at)| *fires_at);
        entries
    }

    /// Whether any timer is pending
    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
