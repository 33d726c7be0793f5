// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! punch execution engine: jittered scheduling, the single-flight guard,
//! and the fixed action chain, driven by one sequential event loop.

pub mod alarm;
pub mod chain;
mod error;
mod executor;
pub mod jitter;
mod runtime;
mod scheduler;

pub use error::RuntimeError;
pub use executor::{ExecuteError, Executor};
pub use runtime::{Runtime, RuntimeDeps};
pub use scheduler::Scheduler;
