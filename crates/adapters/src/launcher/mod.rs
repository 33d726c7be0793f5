// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application launcher adapters

mod desktop;

pub use desktop::DesktopLauncher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLauncher, LaunchCall, LaunchOp};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from launcher operations
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("launch command failed: {0}")]
    CommandFailed(String),
    #[error("app is not installed: {0}")]
    NotInstalled(String),
}

/// Adapter for starting and foregrounding desktop applications.
///
/// `launch` starts (or re-activates) an app; `focus` only raises an already
/// running instance and fails when nothing is running. The engine uses
/// `focus` as the primary return-to-host method and `launch` as the
/// fallback.
#[async_trait]
pub trait LauncherAdapter: Clone + Send + Sync + 'static {
    /// Whether the app is installed on this machine
    async fn is_installed(&self, app: &str) -> bool;

    /// Start the app, bringing it to the foreground
    async fn launch(&self, app: &str) -> Result<(), LaunchError>;

    /// Raise an already running instance of the app
    async fn focus(&self, app: &str) -> Result<(), LaunchError>;
}
