// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording notification adapter for tests.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One recorded notification.
#[derive(Debug, Clone)]
pub struct NotifyCall {
    pub title: String,
    pub message: String,
}

/// Records every notification; sends can be made to fail.
#[derive(Clone, Default)]
pub struct FakeNotifyAdapter {
    sent: Arc<Mutex<Vec<NotifyCall>>>,
    fail: Arc<AtomicBool>,
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, in order.
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.sent.lock().clone()
    }

    /// Make every later `notify` return an error. The call is still
    /// recorded, matching a send that reached the bus and was rejected.
    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        self.sent.lock().push(NotifyCall {
            title: title.to_string(),
            message: message.to_string(),
        });
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::SendFailed("injected failure".to_string()));
        }
        Ok(())
    }
}
