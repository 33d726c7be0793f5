// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! punch daemon (punchd)
//!
//! Background process that owns the event loop and fires the schedule.
//!
//! Two halves: a spawned listener task owns the socket and feeds requests
//! to the event bus; the main task drains the bus sequentially and checks
//! the timer wheel once a second.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod event_bus;
mod lifecycle;
mod listener;
mod protocol;

use std::sync::Arc;
use std::time::Duration;

use punch_core::{Clock, Event};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Notify;
use tracing::{error, info};

use crate::lifecycle::{Config, LifecycleError, StartupResult};
use crate::listener::Listener;

const USAGE: &str = "\
punchd - fires scheduled clock actions

USAGE:
    punchd

Normally spawned by the `punch` CLI; it listens on a Unix socket and
runs the schedule until asked to stop.

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Info flags answer before any config or lock is touched
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("punchd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("punchd {}", env!("CARGO_PKG_VERSION"));
                println!("{USAGE}");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: punchd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;
    let _log_guard = setup_logging(&config)?;

    info!("Starting daemon");

    let StartupResult {
        mut daemon,
        listener: unix_listener,
        mut event_reader,
    } = match lifecycle::startup(&config).await {
        Ok(r) => r,
        Err(LifecycleError::LockFailed(_)) => {
            let pid = std::fs::read_to_string(&config.lock_path)
                .unwrap_or_default()
                .trim()
                .to_string();
            eprintln!("punchd is already running");
            if !pid.is_empty() {
                eprintln!("  pid: {pid}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            error!("Failed to start daemon: {}", e);
            return Err(e.into());
        }
    };

    // Shutdown signal: out-of-band so a shutdown request is never queued
    // behind pending events.
    let shutdown_notify = Arc::new(Notify::new());

    let listener = Listener::new(
        unix_listener,
        daemon.event_bus.clone(),
        Arc::clone(&daemon.runtime),
        daemon.config.config_path.clone(),
        daemon.start_time,
        Arc::clone(&shutdown_notify),
    );
    tokio::spawn(listener.run());

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(
        "Daemon ready, listening on {}",
        config.socket_path.display()
    );

    // Signal ready for parent process (e.g., systemd, CLI waiting for startup)
    println!("READY");

    // Timer resolution is 1s. The interval lives outside the loop: a
    // sleep() built inside a select! branch would restart on every event
    // and never fire while the daemon is busy.
    let mut timer_check = tokio::time::interval(Duration::from_secs(1));

    // Engine loop - processes events sequentially
    loop {
        tokio::select! {
            event = event_reader.recv() => {
                match event {
                    Some(Event::Shutdown) => {
                        info!("Shutdown event received");
                        break;
                    }
                    Some(event) => {
                        if let Err(e) = daemon.process_event(event).await {
                            error!("Error processing event: {}", e);
                        }
                    }
                    None => {
                        info!("Event bus closed, shutting down...");
                        break;
                    }
                }
            }

            _ = shutdown_notify.notified() => {
                info!("Shutdown requested via command");
                break;
            }

            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }

            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break;
            }

            _ = timer_check.tick() => {
                daemon.runtime.resync_alarms();
                let now = daemon.runtime.clock().now();
                let timer_events = {
                    let scheduler = daemon.runtime.scheduler();
                    let mut scheduler = scheduler.lock();
                    scheduler.fired_timers(now)
                };
                for event in timer_events {
                    if let Err(e) = daemon.event_bus.send(event) {
                        error!("Failed to send timer event: {}", e);
                    }
                }
            }
        }
    }

    daemon.shutdown()?;
    info!("Daemon stopped");
    Ok(())
}

/// Log to a single file under the state dir, non-blocking so a slow disk
/// never stalls the engine loop. `RUST_LOG` overrides the `info` default.
fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = config.log_path.parent().ok_or(LifecycleError::NoStateDir)?;
    let file = config
        .log_path
        .file_name()
        .ok_or(LifecycleError::NoStateDir)?;
    std::fs::create_dir_all(dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(writer))
        .init();

    Ok(guard)
}
