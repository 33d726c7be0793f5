// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded execution of desktop tooling (gtk-launch, wmctrl).

use std::process::Output;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Deadline for a single tool invocation. These tools answer in well under
/// a second; a hang here means the session bus or X server is wedged.
pub const LAUNCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{tool} failed: {source}")]
    Run {
        tool: String,
        source: std::io::Error,
    },
    #[error("{tool} did not finish within {}s", .deadline.as_secs())]
    Hung { tool: String, deadline: Duration },
}

/// Run a tool to completion under a deadline.
///
/// A nonzero exit status is not an error at this layer; callers inspect
/// the returned [`Output`]. On timeout the child is killed when the tokio
/// handle drops.
pub async fn run_with_timeout(
    mut cmd: Command,
    deadline: Duration,
    tool: &str,
) -> Result<Output, ToolError> {
    let run = tokio::time::timeout(deadline, cmd.output());
    match run.await {
        Ok(result) => result.map_err(|source| ToolError::Run {
            tool: tool.to_string(),
            source,
        }),
        Err(_) => Err(ToolError::Hung {
            tool: tool.to_string(),
            deadline,
        }),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
