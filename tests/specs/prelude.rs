// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Builds a runtime on fake adapters and replays the daemon event loop:
//! advance the clock, drain fired timers, feed produced events back in.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeZone};
use punch_adapters::{FakeLauncher, FakeNotifyAdapter, FakeWakeLock};
use punch_core::{Event, FakeClock, ScheduleConfig, TriggerKind};
pub use punch_adapters::WakeLockAdapter;
pub use punch_core::Clock;
use punch_engine::{Runtime, RuntimeDeps};
use rand::{rngs::StdRng, SeedableRng};

pub type SpecRuntime = Runtime<FakeLauncher, FakeNotifyAdapter, FakeWakeLock, FakeClock>;

pub struct Harness {
    pub runtime: SpecRuntime,
    pub launcher: FakeLauncher,
    pub notifier: FakeNotifyAdapter,
    pub wake: FakeWakeLock,
    pub clock: FakeClock,
}

/// A harness whose wall clock starts at the given local time.
pub fn harness_at(wall: &str, config: ScheduleConfig) -> Harness {
    let naive: NaiveDateTime = wall.parse().unwrap();
    let clock = FakeClock::at(Local.from_local_datetime(&naive).single().unwrap());
    let launcher = FakeLauncher::new();
    let notifier = FakeNotifyAdapter::new();
    let wake = FakeWakeLock::new();
    let runtime = Runtime::with_rng(
        RuntimeDeps {
            launcher: launcher.clone(),
            notifier: notifier.clone(),
            wake: wake.clone(),
        },
        clock.clone(),
        config,
        StdRng::seed_from_u64(42),
    );
    Harness {
        runtime,
        launcher,
        notifier,
        wake,
        clock,
    }
}

/// Config with jitter disabled so attempts start synchronously.
pub fn no_jitter_config() -> ScheduleConfig {
    ScheduleConfig {
        max_jitter_secs: 0,
        ..ScheduleConfig::default()
    }
}

impl Harness {
    /// Advance the clock, then drain fired timers and every event they
    /// produce, the way the daemon loop does. Returns all handled events.
    pub async fn tick(&self, advance: Duration) -> Vec<Event> {
        self.clock.advance(advance);
        let scheduler = self.runtime.scheduler();
        let fired = scheduler.lock().fired_timers(self.clock.now());
        self.drain(fired.into()).await
    }

    /// Feed a manual trigger request through the loop.
    pub async fn request(&self, kind: TriggerKind) -> Vec<Event> {
        self.drain(VecDeque::from([Event::TriggerRequested {
            kind,
            jitter_applied: false,
        }]))
        .await
    }

    /// Apply a configuration change through the loop.
    pub async fn reconfigure(&self, config: ScheduleConfig) -> Vec<Event> {
        self.drain(VecDeque::from([Event::ConfigChanged { config }])).await
    }

    async fn drain(&self, mut queue: VecDeque<Event>) -> Vec<Event> {
        let mut handled = Vec::new();
        while let Some(event) = queue.pop_front() {
            handled.push(event.clone());
            for produced in self.runtime.handle_event(event).await.unwrap() {
                queue.push_back(produced);
            }
        }
        handled
    }

    /// Run an already-started attempt through dwell, settle, and cooldown.
    pub async fn run_chain_to_idle(&self) -> Vec<Event> {
        let mut handled = self.tick(punch_engine::chain::DWELL).await;
        handled.extend(self.tick(punch_engine::chain::SETTLE).await);
        handled.extend(self.tick(punch_engine::chain::COOLDOWN).await);
        handled
    }
}
