// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O
//!
//! Everything the engine does to the outside world goes through one of the
//! traits here: launching and focusing applications, posting desktop
//! notifications, and holding a sleep inhibitor. Each trait has a real
//! implementation and a call-recording fake for tests.

pub mod launcher;
pub mod notify;
pub mod subprocess;
pub mod wake;

pub use launcher::{DesktopLauncher, LaunchError, LauncherAdapter};
pub use notify::{DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, NotifyError};
pub use wake::{InhibitorWakeLock, NoOpWakeLock, WakeError, WakeLockAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use launcher::{FakeLauncher, LaunchCall, LaunchOp};
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use wake::{FakeWakeLock, WakeCall};
