// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Managing the punchd process itself: spawning it detached, finding its
//! socket and pid, and watching it die.

use crate::client::ClientError;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Spawn punchd detached from this terminal.
pub fn start_daemon_background() -> Result<std::process::Child, ClientError> {
    Command::new(find_punchd_binary())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClientError::DaemonStartFailed(e.to_string()))
}

/// Resolution order: `PUNCHD_BIN` override, then a sibling of the current
/// executable (the normal installed layout), then whatever PATH finds.
fn find_punchd_binary() -> PathBuf {
    if let Ok(path) = std::env::var("PUNCHD_BIN") {
        return PathBuf::from(path);
    }

    let sibling = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("punchd")));
    match sibling {
        Some(path) if path.exists() => path,
        _ => PathBuf::from("punchd"),
    }
}

/// State directory of the user-level daemon.
pub fn daemon_dir() -> Result<PathBuf, ClientError> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|d| d.join("punch"))
        .ok_or(ClientError::NoStateDir)
}

pub fn daemon_socket() -> Result<PathBuf, ClientError> {
    Ok(daemon_dir()?.join("daemon.sock"))
}

/// The pid recorded by a running daemon, if any. An unreadable or
/// garbled pid file reads as "no pid" rather than an error.
pub fn read_daemon_pid() -> Result<Option<u32>, ClientError> {
    let pid_path = daemon_dir()?.join("daemon.pid");
    let Ok(content) = std::fs::read_to_string(&pid_path) else {
        return Ok(None);
    };
    Ok(content.trim().parse::<u32>().ok())
}

/// Signal 0 probes for existence without delivering anything.
pub fn process_exists(pid: u32) -> bool {
    Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Poll until the process is gone or the deadline passes.
pub async fn wait_for_exit(pid: u32, deadline: Duration) -> bool {
    let started = Instant::now();
    while started.elapsed() < deadline {
        if !process_exists(pid) {
            return true;
        }
        tokio::time::sleep(crate::client::poll_interval()).await;
    }
    false
}

/// Remove a socket file whose daemon is gone.
pub fn cleanup_stale_socket() -> Result<(), ClientError> {
    let socket_path = daemon_socket()?;
    if socket_path.exists() {
        std::fs::remove_file(&socket_path)?;
    }
    Ok(())
}

/// Whether the socket actually accepts connections. A crashed daemon
/// leaves the file behind; only a live one answers.
pub fn probe_socket(path: &std::path::Path) -> bool {
    std::os::unix::net::UnixStream::connect(path).is_ok()
}
