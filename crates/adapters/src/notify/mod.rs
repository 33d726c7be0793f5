// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing notifications.
//!
//! The engine announces every scheduling decision and attempt outcome
//! through this seam: the chosen jitter delay, a dropped trigger, a
//! finished attempt. Failures here are presentation-only and the executor
//! treats them as non-fatal.

mod desktop;

pub use desktop::DesktopNotifyAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Posts a notification with a short title and a one-line body.
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

/// Discards every notification. For headless environments without a
/// notification service on the session bus.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotifyAdapter;

impl NoOpNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifyAdapter for NoOpNotifyAdapter {
    async fn notify(&self, _title: &str, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
