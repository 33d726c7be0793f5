// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake launcher adapter for testing

use super::{LaunchError, LauncherAdapter};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Which launcher operation was invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOp {
    Launch,
    Focus,
}

/// Recorded launcher call
#[derive(Debug, Clone)]
pub struct LaunchCall {
    pub op: LaunchOp,
    pub app: String,
}

struct FakeLauncherState {
    calls: Vec<LaunchCall>,
    not_installed: HashSet<String>,
    fail_launch: HashSet<String>,
    fail_focus: HashSet<String>,
}

/// Fake launcher adapter for testing.
///
/// All apps are installed and all operations succeed unless told
/// otherwise per app.
#[derive(Clone)]
pub struct FakeLauncher {
    inner: Arc<Mutex<FakeLauncherState>>,
}

impl Default for FakeLauncher {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeLauncherState {
                calls: Vec::new(),
                not_installed: HashSet::new(),
                fail_launch: HashSet::new(),
                fail_focus: HashSet::new(),
            })),
        }
    }
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded launch/focus calls
    pub fn calls(&self) -> Vec<LaunchCall> {
        self.inner.lock().calls.clone()
    }

    /// Make `is_installed` report false for this app
    pub fn set_not_installed(&self, app: &str) {
        self.inner.lock().not_installed.insert(app.to_string());
    }

    /// Make `launch` fail for this app
    pub fn fail_launch(&self, app: &str) {
        self.inner.lock().fail_launch.insert(app.to_string());
    }

    /// Make `focus` fail for this app
    pub fn fail_focus(&self, app: &str) {
        self.inner.lock().fail_focus.insert(app.to_string());
    }
}

#[async_trait]
impl LauncherAdapter for FakeLauncher {
    async fn is_installed(&self, app: &str) -> bool {
        !self.inner.lock().not_installed.contains(app)
    }

    async fn launch(&self, app: &str) -> Result<(), LaunchError> {
        let mut state = self.inner.lock();
        state.calls.push(LaunchCall {
            op: LaunchOp::Launch,
            app: app.to_string(),
        });
        if state.fail_launch.contains(app) {
            return Err(LaunchError::CommandFailed(format!("launch {app}")));
        }
        Ok(())
    }

    async fn focus(&self, app: &str) -> Result<(), LaunchError> {
        let mut state = self.inner.lock();
        state.calls.push(LaunchCall {
            op: LaunchOp::Focus,
            app: app.to_string(),
        });
        if state.fail_focus.contains(app) {
            return Err(LaunchError::CommandFailed(format!("focus {app}")));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
