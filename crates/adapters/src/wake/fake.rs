// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake wake-lock adapter for testing

use super::{WakeError, WakeLockAdapter};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Recorded wake-lock call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WakeCall {
    Acquire { max_hold: Duration },
    Release,
}

struct FakeWakeState {
    calls: Vec<WakeCall>,
    held: bool,
}

/// Fake wake-lock adapter for testing
#[derive(Clone)]
pub struct FakeWakeLock {
    inner: Arc<Mutex<FakeWakeState>>,
}

impl Default for FakeWakeLock {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeWakeState {
                calls: Vec::new(),
                held: false,
            })),
        }
    }
}

impl FakeWakeLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded acquire/release calls
    pub fn calls(&self) -> Vec<WakeCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl WakeLockAdapter for FakeWakeLock {
    async fn acquire(&self, max_hold: Duration) -> Result<(), WakeError> {
        let mut state = self.inner.lock();
        state.calls.push(WakeCall::Acquire { max_hold });
        state.held = true;
        Ok(())
    }

    async fn release(&self) -> Result<(), WakeError> {
        let mut state = self.inner.lock();
        state.calls.push(WakeCall::Release);
        state.held = false;
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.inner.lock().held
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
