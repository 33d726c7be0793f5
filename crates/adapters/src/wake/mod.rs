// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wake-lock (sleep inhibitor) adapters

mod inhibitor;
mod noop;

pub use inhibitor::InhibitorWakeLock;
pub use noop::NoOpWakeLock;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWakeLock, WakeCall};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from wake-lock operations
#[derive(Debug, Error)]
pub enum WakeError {
    #[error("inhibitor failed: {0}")]
    Inhibitor(String),
}

/// Adapter for holding a system sleep inhibitor.
///
/// The lock self-expires after `max_hold` even if `release` is never
/// called, so a crashed attempt cannot keep the machine awake
/// indefinitely. Acquiring while held replaces the previous hold.
#[async_trait]
pub trait WakeLockAdapter: Clone + Send + Sync + 'static {
    /// Acquire the lock for at most `max_hold`
    async fn acquire(&self, max_hold: Duration) -> Result<(), WakeError>;

    /// Release the lock; releasing an unheld lock is a no-op
    async fn release(&self) -> Result<(), WakeError>;

    /// Whether the lock is currently held
    fn is_held(&self) -> bool;
}
