// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction so timing logic can be tested deterministically.
//!
//! `now()` drives monotonic timer deadlines; `wall_time()` drives daily
//! alarm computation. The two advance together in `FakeClock`.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Source of monotonic and wall-clock time.
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic instant, used for timer deadlines.
    fn now(&self) -> Instant;

    /// Local wall-clock time, used for alarm scheduling.
    fn wall_time(&self) -> DateTime<Local>;
}

/// Clock backed by the real system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually advanced clock for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone)]
pub struct FakeClock {
    inner: std::sync::Arc<parking_lot::Mutex<FakeClockState>>,
}

#[cfg(any(test, feature = "test-support"))]
struct FakeClockState {
    now: Instant,
    wall: DateTime<Local>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeClock {
    /// Create a fake clock starting at the current real time.
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Create a fake clock starting at the given wall-clock time.
    pub fn at(wall: DateTime<Local>) -> Self {
        Self {
            inner: std::sync::Arc::new(parking_lot::Mutex::new(FakeClockState {
                now: Instant::now(),
                wall,
            })),
        }
    }

    /// Advance both the monotonic and wall clock by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut state = self.inner.lock();
        state.now += duration;
        state.wall += chrono::Duration::from_std(duration).unwrap_or_default();
    }

    /// Reposition the wall clock without touching the monotonic clock.
    pub fn set_wall_time(&self, wall: DateTime<Local>) {
        self.inner.lock().wall = wall;
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().now
    }

    fn wall_time(&self) -> DateTime<Local> {
        self.inner.lock().wall
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
