// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specifications for punch.
//!
//! These tests drive the runtime in-process with fake adapters and a fake
//! clock, replaying the daemon's event loop deterministically.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// schedule/
#[path = "specs/schedule/full_day.rs"]
mod schedule_full_day;

// guard/
#[path = "specs/guard/single_flight.rs"]
mod guard_single_flight;

// chain/
#[path = "specs/chain/timing.rs"]
mod chain_timing;

// config/
#[path = "specs/config/roundtrip.rs"]
mod config_roundtrip;
