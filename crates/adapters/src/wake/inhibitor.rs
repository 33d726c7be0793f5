// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wake lock backed by `systemd-inhibit`.
//!
//! The inhibitor is a child process running `systemd-inhibit ... sleep N`.
//! The lock lives exactly as long as the child: killing it releases the
//! inhibitor, and the `sleep` bounds the hold at `max_hold` even if the
//! daemon never calls `release`.

use super::{WakeError, WakeLockAdapter};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::{Child, Command};

#[derive(Clone, Default)]
pub struct InhibitorWakeLock {
    child: Arc<Mutex<Option<Child>>>,
}

impl InhibitorWakeLock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WakeLockAdapter for InhibitorWakeLock {
    async fn acquire(&self, max_hold: Duration) -> Result<(), WakeError> {
        let mut cmd = Command::new("systemd-inhibit");
        cmd.args([
            "--what=sleep:idle",
            "--who=punchd",
            "--why=clock action in flight",
            "sleep",
            &max_hold.as_secs().to_string(),
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| WakeError::Inhibitor(e.to_string()))?;

        tracing::info!(max_hold_secs = max_hold.as_secs(), "wake lock acquired");
        if let Some(mut previous) = self.child.lock().replace(child) {
            // Acquire-while-held replaces the hold
            let _ = previous.start_kill();
        }
        Ok(())
    }

    async fn release(&self) -> Result<(), WakeError> {
        if let Some(mut child) = self.child.lock().take() {
            let _ = child.start_kill();
            tracing::info!("wake lock released");
        }
        Ok(())
    }

    fn is_held(&self) -> bool {
        let mut slot = self.child.lock();
        match slot.as_mut() {
            // try_wait returns Ok(None) while the child is still running
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                _ => {
                    *slot = None;
                    false
                }
            },
            None => false,
        }
    }
}
