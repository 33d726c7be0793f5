// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `punch daemon` - daemon management commands

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::client::{self, ClientError, DaemonClient};
use crate::daemon_process::{
    cleanup_stale_socket, daemon_socket, probe_socket, process_exists, read_daemon_pid,
    start_daemon_background, wait_for_exit,
};
use punch_daemon::{Request, Response, PROTOCOL_VERSION};

#[derive(Args)]
pub struct DaemonArgs {
    #[command(subcommand)]
    pub command: DaemonCommand,
}

#[derive(Subcommand)]
pub enum DaemonCommand {
    /// Start the daemon in the background
    Start,
    /// Stop the daemon
    Stop,
    /// Check daemon status
    Status,
}

pub async fn daemon(args: DaemonArgs) -> Result<()> {
    match args.command {
        DaemonCommand::Start => start().await,
        DaemonCommand::Stop => stop().await,
        DaemonCommand::Status => status().await,
    }
}

async fn start() -> Result<()> {
    let socket = daemon_socket()?;
    if socket.exists() && probe_socket(&socket) {
        println!("punchd already running");
        return Ok(());
    }
    cleanup_stale_socket()?;

    let mut child = start_daemon_background()?;
    let deadline = std::time::Instant::now() + client::timeout_connect();
    while std::time::Instant::now() < deadline {
        if let Ok(Some(exit)) = child.try_wait() {
            bail!("punchd exited during startup with {}", exit);
        }
        if probe_socket(&socket) {
            match read_daemon_pid()? {
                Some(pid) => println!("punchd started (pid {})", pid),
                None => println!("punchd started"),
            }
            return Ok(());
        }
        tokio::time::sleep(client::poll_interval()).await;
    }
    bail!("timed out waiting for punchd to start")
}

async fn stop() -> Result<()> {
    let client = match DaemonClient::connect() {
        Ok(c) => c,
        Err(ClientError::DaemonNotRunning) => {
            println!("punchd not running");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let pid = read_daemon_pid()?;

    match client.send(&Request::Shutdown).await {
        Ok(Response::ShuttingDown) => {}
        Ok(_) => return Err(ClientError::UnexpectedResponse.into()),
        // A connection dropped mid-shutdown means the daemon is going away
        Err(ClientError::Io(_)) | Err(ClientError::Protocol(_)) => {}
        Err(e) => return Err(e.into()),
    }

    if let Some(pid) = pid {
        if wait_for_exit(pid, client::timeout_exit()).await {
            println!("punchd stopped");
        } else {
            bail!("punchd (pid {}) did not exit; kill it manually", pid);
        }
    } else {
        println!("punchd stopping");
    }
    Ok(())
}

async fn status() -> Result<()> {
    let socket = daemon_socket()?;
    if !socket.exists() || !probe_socket(&socket) {
        // A pid file without a live socket means a crashed daemon
        if let Some(pid) = read_daemon_pid()? {
            if process_exists(pid) {
                println!("punchd (pid {}) is running but not accepting connections", pid);
                return Ok(());
            }
        }
        println!("punchd not running");
        return Ok(());
    }

    let client = DaemonClient::connect()?;
    match client
        .send(&Request::Hello {
            version: PROTOCOL_VERSION.to_string(),
        })
        .await?
    {
        Response::Hello { version } => match read_daemon_pid()? {
            Some(pid) => println!("punchd running (pid {}, version {})", pid, version),
            None => println!("punchd running (version {})", version),
        },
        _ => return Err(ClientError::UnexpectedResponse.into()),
    }
    Ok(())
}
