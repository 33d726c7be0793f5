// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop launcher using `gtk-launch` and `wmctrl`.
//!
//! Apps are identified by their desktop-entry id (the `.desktop` file name
//! without the extension). Installation is detected by looking the entry up
//! in the XDG application directories; launching goes through `gtk-launch`
//! so the entry's `Exec` line and startup notification are honored; focusing
//! uses `wmctrl -x -a` to raise a window of an already running instance.

use super::{LaunchError, LauncherAdapter};
use crate::subprocess::{run_with_timeout, LAUNCH_TIMEOUT};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Launcher backed by the desktop environment's command-line tools
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopLauncher;

impl DesktopLauncher {
    pub fn new() -> Self {
        Self
    }
}

/// XDG directories that can hold `.desktop` entries.
fn application_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/applications"),
        PathBuf::from("/usr/local/share/applications"),
    ];
    if let Some(data) = dirs::data_dir() {
        dirs.push(data.join("applications"));
    }
    dirs
}

async fn run_launcher_command(cmd: Command, description: &str) -> Result<(), LaunchError> {
    let output = run_with_timeout(cmd, LAUNCH_TIMEOUT, description)
        .await
        .map_err(|e| LaunchError::CommandFailed(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::warn!(command = description, stderr = %stderr, "launcher command failed");
        return Err(LaunchError::CommandFailed(format!(
            "{}: {}",
            description,
            stderr.trim()
        )));
    }
    Ok(())
}

#[async_trait]
impl LauncherAdapter for DesktopLauncher {
    async fn is_installed(&self, app: &str) -> bool {
        let entry = format!("{app}.desktop");
        application_dirs()
            .into_iter()
            .any(|dir| dir.join(&entry).exists())
    }

    async fn launch(&self, app: &str) -> Result<(), LaunchError> {
        tracing::info!(app, "launching app");
        let mut cmd = Command::new("gtk-launch");
        cmd.arg(app);
        run_launcher_command(cmd, "gtk-launch").await
    }

    async fn focus(&self, app: &str) -> Result<(), LaunchError> {
        tracing::info!(app, "focusing app");
        let mut cmd = Command::new("wmctrl");
        // -x matches against the window class, which for desktop-entry
        // launched apps is the entry id
        cmd.args(["-x", "-a", app]);
        run_launcher_command(cmd, "wmctrl").await
    }
}

#[cfg(test)]
#[path = "desktop_tests.rs"]
mod tests;
