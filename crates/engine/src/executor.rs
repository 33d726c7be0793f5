// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns effects into adapter calls.

use crate::Scheduler;
use punch_adapters::{LaunchError, LauncherAdapter, NotifyAdapter, WakeLockAdapter};
use punch_core::{Clock, Effect, Event, TracedEffect};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// Errors that can occur during effect execution.
///
/// Only launch failures surface as errors: the runtime turns them into an
/// attempt outcome. Notification and wake-lock failures are logged and
/// swallowed here, since neither may abort an attempt.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("launch error: {0}")]
    Launch(#[from] LaunchError),
}

/// Executes effects using the configured adapters
pub struct Executor<L, N, W, C: Clock> {
    launcher: L,
    notifier: N,
    wake: W,
    scheduler: Arc<Mutex<Scheduler>>,
    clock: C,
}

impl<L, N, W, C> Executor<L, N, W, C>
where
    L: LauncherAdapter,
    N: NotifyAdapter,
    W: WakeLockAdapter,
    C: Clock,
{
    pub fn new(launcher: L, notifier: N, wake: W, clock: C) -> Self {
        Self {
            launcher,
            notifier,
            wake,
            scheduler: Arc::new(Mutex::new(Scheduler::new())),
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Shared handle to the timer map, for the daemon's periodic check
    pub fn scheduler(&self) -> Arc<Mutex<Scheduler>> {
        Arc::clone(&self.scheduler)
    }

    /// Whether the wake lock is currently held
    pub fn wake_lock_held(&self) -> bool {
        self.wake.is_held()
    }

    /// Check whether an app is installed on this machine
    pub async fn app_installed(&self, app: &str) -> bool {
        self.launcher.is_installed(app).await
    }

    /// Execute one effect under a tracing span; `Emit` effects come back
    /// as an event for the loop to requeue.
    pub async fn execute(&self, effect: Effect) -> Result<Option<Event>, ExecuteError> {
        let op_name = effect.name();
        let span = tracing::info_span!("effect", effect = op_name);
        let _guard = span.enter();

        tracing::info!(fields = ?effect.fields(), "executing");

        let result = self.execute_inner(effect).await;
        match &result {
            Ok(event) => tracing::debug!(has_event = event.is_some(), "completed"),
            Err(e) => tracing::error!(error = %e, "failed"),
        }

        result
    }

    async fn execute_inner(&self, effect: Effect) -> Result<Option<Event>, ExecuteError> {
        match effect {
            Effect::Emit { event } => Ok(Some(event)),

            Effect::SetTimer { id, duration } => {
                let now = self.clock.now();
                self.scheduler.lock().set_timer(id, duration, now);
                Ok(None)
            }

            Effect::CancelTimer { id } => {
                self.scheduler.lock().cancel_timer(&id);
                Ok(None)
            }

            Effect::LaunchApp { app } => {
                self.launcher.launch(&app).await?;
                Ok(None)
            }

            Effect::FocusApp { app } => {
                self.launcher.focus(&app).await?;
                Ok(None)
            }

            Effect::AcquireWakeLock { max_hold } => {
                if let Err(e) = self.wake.acquire(max_hold).await {
                    tracing::warn!(error = %e, "wake lock acquire failed, continuing without it");
                }
                Ok(None)
            }

            Effect::ReleaseWakeLock => {
                if let Err(e) = self.wake.release().await {
                    tracing::warn!(error = %e, "wake lock release failed");
                }
                Ok(None)
            }

            Effect::Notify { title, message } => {
                if let Err(e) = self.notifier.notify(&title, &message).await {
                    tracing::warn!(title, error = %e, "notification failed");
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
