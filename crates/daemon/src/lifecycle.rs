// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup and shutdown: paths, the pid lock, and wiring the
//! runtime to its desktop adapters.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use fs2::FileExt;
use punch_adapters::{DesktopLauncher, DesktopNotifyAdapter, InhibitorWakeLock};
use punch_core::{Event, ScheduleConfig, SystemClock};
use punch_engine::{Runtime, RuntimeDeps};
use thiserror::Error;
use tokio::net::UnixListener;
use tracing::{info, warn};

use crate::event_bus::{EventBus, EventReader};

/// The runtime as the daemon runs it, on real adapters.
pub type DaemonRuntime =
    Runtime<DesktopLauncher, DesktopNotifyAdapter, InhibitorWakeLock, SystemClock>;

/// Filesystem layout of a running daemon.
///
/// Everything transient (socket, pid, version marker, log) lives under the
/// XDG state dir; the schedule lives under the XDG config dir so wiping
/// daemon state never loses the user's settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub state_dir: PathBuf,
    pub socket_path: PathBuf,
    pub lock_path: PathBuf,
    pub version_path: PathBuf,
    pub log_path: PathBuf,
    /// The persisted schedule (e.g. ~/.config/punch/schedule.toml)
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, LifecycleError> {
        let state_dir = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .ok_or(LifecycleError::NoStateDir)?
            .join("punch");
        let config_dir = dirs::config_dir()
            .ok_or(LifecycleError::NoStateDir)?
            .join("punch");

        Ok(Self {
            socket_path: state_dir.join("daemon.sock"),
            lock_path: state_dir.join("daemon.pid"),
            version_path: state_dir.join("daemon.version"),
            log_path: state_dir.join("daemon.log"),
            config_path: config_dir.join("schedule.toml"),
            state_dir,
        })
    }

    /// The transient files a daemon instance owns on disk.
    fn owned_files(&self) -> [&PathBuf; 3] {
        [&self.socket_path, &self.lock_path, &self.version_path]
    }
}

/// A started daemon: the engine loop's half of [`StartupResult`].
pub struct DaemonState {
    pub config: Config,
    // Held for the exclusive flock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Shared with the listener task for status/config reads
    pub runtime: Arc<DaemonRuntime>,
    pub event_bus: EventBus,
    pub start_time: Instant,
}

/// Everything `startup` produces; the listener socket is handed back
/// separately so main can spawn it as its own task.
pub struct StartupResult {
    pub daemon: DaemonState,
    pub listener: UnixListener,
    pub event_reader: EventReader,
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] punch_core::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl DaemonState {
    /// Feed one event through the runtime.
    ///
    /// Follow-up events go back onto the bus instead of being handled
    /// inline, so the engine loop sees every event exactly once and in
    /// order.
    pub async fn process_event(&mut self, event: Event) -> Result<(), LifecycleError> {
        let produced = self
            .runtime
            .handle_event(event)
            .await
            .map_err(|e| LifecycleError::Runtime(e.to_string()))?;

        for event in produced {
            if let Err(e) = self.event_bus.send(event) {
                warn!("Failed to enqueue runtime result event: {}", e);
            }
        }

        Ok(())
    }

    /// Remove the daemon's on-disk footprint. The listener task dies with
    /// the tokio runtime; the flock releases when `lock_file` drops.
    pub fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        for path in self.config.owned_files() {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!(path = %path.display(), "Failed to remove file: {}", e);
                }
            }
        }

        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Bring the daemon up, undoing any partial footprint on failure.
///
/// A lock failure is the one exception: the files on disk belong to the
/// daemon that beat us to the lock, so they are left alone.
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    match startup_inner(config).await {
        Ok(result) => Ok(result),
        Err(e) => {
            if !matches!(e, LifecycleError::LockFailed(_)) {
                for path in config.owned_files() {
                    if path.exists() {
                        let _ = std::fs::remove_file(path);
                    }
                }
            }
            Err(e)
        }
    }
}

async fn startup_inner(config: &Config) -> Result<StartupResult, LifecycleError> {
    std::fs::create_dir_all(&config.state_dir)?;
    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // The lock comes before anything else touches the state dir. Opening
    // without truncation matters: truncating before holding the lock would
    // wipe the running daemon's recorded pid.
    let mut lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    use std::io::Write;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    std::fs::write(&config.version_path, env!("CARGO_PKG_VERSION"))?;

    let schedule = ScheduleConfig::load(&config.config_path)?;
    info!(
        enabled = schedule.enabled,
        check_in = %schedule.check_in,
        check_out = %schedule.check_out,
        "loaded schedule"
    );

    let runtime = Arc::new(Runtime::new(
        RuntimeDeps {
            launcher: DesktopLauncher::new(),
            notifier: DesktopNotifyAdapter::new(),
            wake: InhibitorWakeLock::new(),
        },
        SystemClock::new(),
        schedule,
    ));

    // Daily alarms come up with the daemon (no-op while disabled)
    runtime
        .arm_alarms()
        .await
        .map_err(|e| LifecycleError::Runtime(e.to_string()))?;

    // Bind last, once everything that can fail has passed. A leftover
    // socket from an unclean exit is replaced; the flock already proved
    // no other daemon is alive.
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let listener = UnixListener::bind(&config.socket_path)
        .map_err(|e| LifecycleError::BindFailed(config.socket_path.clone(), e))?;

    let (event_bus, event_reader) = EventBus::new();

    Ok(StartupResult {
        daemon: DaemonState {
            config: config.clone(),
            lock_file,
            runtime,
            event_bus,
            start_time: Instant::now(),
        },
        listener,
        event_reader,
    })
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
