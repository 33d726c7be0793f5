// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Socket client for talking to punchd.
//!
//! One request/response pair per connection. Commands that mutate state
//! auto-start the daemon; `punch status` style queries connect only.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::daemon_process::{
    cleanup_stale_socket, daemon_socket, probe_socket, start_daemon_background,
};

use punch_daemon::protocol::{self, ProtocolError};
use punch_daemon::{Request, Response};
use thiserror::Error;
use tokio::net::UnixStream;

/// Timeouts, overridable through `PUNCH_*_MS` environment variables so the
/// behavioral specs can run with tight deadlines.
mod env_ms {
    use std::time::Duration;

    pub fn read(var: &str, default: Duration) -> Duration {
        std::env::var(var)
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(default, Duration::from_millis)
    }
}

/// Deadline for one request/response exchange
pub fn timeout_ipc() -> Duration {
    env_ms::read("PUNCH_TIMEOUT_IPC_MS", Duration::from_secs(5))
}

/// How long to wait for a freshly spawned punchd to accept connections
pub fn timeout_connect() -> Duration {
    env_ms::read("PUNCH_TIMEOUT_CONNECT_MS", Duration::from_secs(5))
}

/// How long `punch daemon stop` waits for the process to exit
pub fn timeout_exit() -> Duration {
    env_ms::read("PUNCH_TIMEOUT_EXIT_MS", Duration::from_secs(2))
}

/// Interval between connection attempts while waiting on startup
pub fn poll_interval() -> Duration {
    env_ms::read("PUNCH_CONNECT_POLL_MS", Duration::from_millis(50))
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Daemon not running (try `punch daemon start`)")]
    DaemonNotRunning,

    #[error("Failed to start daemon: {0}")]
    DaemonStartFailed(String),

    #[error("Connection timeout waiting for daemon to start")]
    DaemonStartTimeout,

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Daemon rejected request: {0}")]
    Rejected(String),

    #[error("Unexpected response from daemon")]
    UnexpectedResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine state directory")]
    NoStateDir,
}

pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    /// Connect to a running daemon; never starts one.
    pub fn connect() -> Result<Self, ClientError> {
        let socket_path = daemon_socket()?;
        if socket_path.exists() {
            Ok(Self { socket_path })
        } else {
            Err(ClientError::DaemonNotRunning)
        }
    }

    /// Connect, spawning punchd first if it is not running. A socket file
    /// that no longer accepts connections counts as not running.
    pub fn connect_or_start() -> Result<Self, ClientError> {
        if let Ok(client) = Self::connect() {
            if probe_socket(&client.socket_path) {
                return Ok(client);
            }
            cleanup_stale_socket()?;
        }

        let child = start_daemon_background()?;
        await_startup(child)
    }

    /// One request/response exchange over a fresh connection.
    pub async fn send(&self, request: &Request) -> Result<Response, ClientError> {
        let deadline = timeout_ipc();
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (mut reader, mut writer) = stream.into_split();

        let payload = protocol::encode(request)?;
        let exchange = async {
            protocol::write_message(&mut writer, &payload).await?;
            protocol::read_message(&mut reader).await
        };
        let raw = tokio::time::timeout(deadline, exchange)
            .await
            .map_err(|_| ProtocolError::Timeout)??;

        match protocol::decode::<Response>(&raw)? {
            Response::Error { message } => Err(ClientError::Rejected(message)),
            response => Ok(response),
        }
    }

    /// Send a request whose only success response is `Ok`.
    pub async fn send_expect_ok(&self, request: &Request) -> Result<(), ClientError> {
        match self.send(request).await? {
            Response::Ok => Ok(()),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }
}

/// Poll for the spawned daemon's socket, watching for early exit so a
/// startup crash surfaces as its exit status instead of a timeout.
fn await_startup(mut child: std::process::Child) -> Result<DaemonClient, ClientError> {
    let started = Instant::now();
    let deadline = timeout_connect();

    while started.elapsed() < deadline {
        if let Ok(Some(status)) = child.try_wait() {
            return Err(ClientError::DaemonStartFailed(format!(
                "exited with {status}"
            )));
        }

        match DaemonClient::connect() {
            Ok(client) if probe_socket(&client.socket_path) => return Ok(client),
            Ok(_) | Err(ClientError::DaemonNotRunning) => {}
            Err(e) => return Err(e),
        }
        std::thread::sleep(poll_interval());
    }

    Err(ClientError::DaemonStartTimeout)
}
