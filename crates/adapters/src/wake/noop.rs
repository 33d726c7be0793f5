// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op wake-lock adapter.

use super::{WakeError, WakeLockAdapter};
use async_trait::async_trait;
use std::time::Duration;

/// Wake-lock adapter that holds nothing.
///
/// Used on hosts without systemd, where sleep inhibition is unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpWakeLock;

impl NoOpWakeLock {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WakeLockAdapter for NoOpWakeLock {
    async fn acquire(&self, _max_hold: Duration) -> Result<(), WakeError> {
        Ok(())
    }

    async fn release(&self) -> Result<(), WakeError> {
        Ok(())
    }

    fn is_held(&self) -> bool {
        false
    }
}
