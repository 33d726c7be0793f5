// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for handling socket I/O.
//!
//! The Listener runs in a spawned task, accepting connections and
//! handling them without blocking the engine loop. Trigger and config
//! requests are emitted onto the EventBus for sequential processing;
//! status and config reads answer directly from the runtime.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use punch_adapters::{LauncherAdapter, NotifyAdapter, WakeLockAdapter};
use punch_core::{Clock, Event, TriggerKind};
use punch_engine::Runtime;
use thiserror::Error;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use crate::event_bus::EventBus;
use crate::protocol::{
    self, Request, Response, StatusReport, DEFAULT_TIMEOUT, PROTOCOL_VERSION,
};

/// Listener task for accepting socket connections.
pub struct Listener<L, N, W, C: Clock> {
    socket: UnixListener,
    event_bus: EventBus,
    runtime: Arc<Runtime<L, N, W, C>>,
    config_path: PathBuf,
    start_time: Instant,
    shutdown: Arc<Notify>,
}

/// Errors from connection handling.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),
}

impl<L, N, W, C> Listener<L, N, W, C>
where
    L: LauncherAdapter,
    N: NotifyAdapter,
    W: WakeLockAdapter,
    C: Clock,
{
    /// Create a new listener.
    pub fn new(
        socket: UnixListener,
        event_bus: EventBus,
        runtime: Arc<Runtime<L, N, W, C>>,
        config_path: PathBuf,
        start_time: Instant,
        shutdown: Arc<Notify>,
    ) -> Self {
        Self {
            socket,
            event_bus,
            runtime,
            config_path,
            start_time,
            shutdown,
        }
    }

    /// Run the listener loop until shutdown, spawning tasks for each connection.
    pub async fn run(self) {
        loop {
            match self.socket.accept().await {
                Ok((stream, _)) => {
                    let event_bus = self.event_bus.clone();
                    let runtime = Arc::clone(&self.runtime);
                    let config_path = self.config_path.clone();
                    let start_time = self.start_time;
                    let shutdown = Arc::clone(&self.shutdown);

                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(
                            stream, event_bus, runtime, config_path, start_time, shutdown,
                        )
                        .await
                        {
                            match e {
                                ConnectionError::Protocol(
                                    protocol::ProtocolError::ConnectionClosed,
                                ) => debug!("Client disconnected"),
                                ConnectionError::Protocol(protocol::ProtocolError::Timeout) => {
                                    warn!("Connection timeout")
                                }
                                _ => error!("Connection error: {}", e),
                            }
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }
}

/// Handle a single client connection.
async fn handle_connection<L, N, W, C>(
    stream: UnixStream,
    event_bus: EventBus,
    runtime: Arc<Runtime<L, N, W, C>>,
    config_path: PathBuf,
    start_time: Instant,
    shutdown: Arc<Notify>,
) -> Result<(), ConnectionError>
where
    L: LauncherAdapter,
    N: NotifyAdapter,
    W: WakeLockAdapter,
    C: Clock,
{
    let (mut reader, mut writer) = stream.into_split();

    let request = protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await?;

    // Log status polls at debug level, other requests at info
    if matches!(request, Request::Status | Request::GetConfig) {
        debug!(request = ?request, "received query");
    } else {
        info!(request = ?request, "received request");
    }

    let response = handle_request(
        request,
        &event_bus,
        &runtime,
        &config_path,
        start_time,
        &shutdown,
    );

    debug!("Sending response: {:?}", response);
    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await?;

    Ok(())
}

/// Handle a single request and return a response.
fn handle_request<L, N, W, C>(
    request: Request,
    event_bus: &EventBus,
    runtime: &Runtime<L, N, W, C>,
    config_path: &Path,
    start_time: Instant,
    shutdown: &Notify,
) -> Response
where
    L: LauncherAdapter,
    N: NotifyAdapter,
    W: WakeLockAdapter,
    C: Clock,
{
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version: _ } => Response::Hello {
            version: PROTOCOL_VERSION.to_string(),
        },

        Request::Status => Response::Status {
            report: status_report(runtime, start_time),
        },

        Request::GetConfig => Response::Config {
            config: runtime.config(),
        },

        Request::SetConfig { config } => {
            // Persist first: a config that can't be saved shouldn't be live
            if let Err(e) = config.save(config_path) {
                return Response::Error {
                    message: format!("failed to save config: {e}"),
                };
            }
            match event_bus.send(Event::ConfigChanged { config }) {
                Ok(()) => Response::Ok,
                Err(e) => Response::Error {
                    message: e.to_string(),
                },
            }
        }

        Request::Trigger { kind } => {
            match event_bus.send(Event::TriggerRequested {
                kind,
                jitter_applied: false,
            }) {
                Ok(()) => Response::Ok,
                Err(e) => Response::Error {
                    message: e.to_string(),
                },
            }
        }

        Request::Shutdown => {
            shutdown.notify_one();
            Response::ShuttingDown
        }
    }
}

fn status_report<L, N, W, C>(runtime: &Runtime<L, N, W, C>, start_time: Instant) -> StatusReport
where
    L: LauncherAdapter,
    N: NotifyAdapter,
    W: WakeLockAdapter,
    C: Clock,
{
    let config = runtime.config();
    let next = |kind: TriggerKind| {
        config
            .enabled
            .then(|| runtime.next_occurrence(kind))
            .flatten()
            .map(|dt| dt.to_rfc3339())
    };

    StatusReport {
        summary: runtime.status_line(),
        guard: runtime.guard_state(),
        enabled: config.enabled,
        next_check_in: next(TriggerKind::CheckIn),
        next_check_out: next(TriggerKind::CheckOut),
        wake_lock_held: runtime.wake_lock_held(),
        uptime_secs: start_time.elapsed().as_secs(),
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
