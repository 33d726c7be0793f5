// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! punch-core: Core types for the punch clock-action automation tool

pub mod clock;
pub mod config;
pub mod effect;
pub mod event;
pub mod guard;
pub mod timer;
pub mod traced;
pub mod trigger;

pub use clock::{Clock, SystemClock};
pub use config::{ClockTime, ConfigError, ScheduleConfig};
pub use effect::Effect;
pub use event::Event;
pub use guard::{ExecutionGuard, GuardBusy, GuardState};
pub use timer::TimerId;
pub use traced::TracedEffect;
pub use trigger::{AttemptOutcome, TriggerKind};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
