// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IPC Protocol for daemon communication.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload

use punch_core::{GuardState, ScheduleConfig, TriggerKind};
use serde::{Deserialize, Serialize};

#[path = "protocol_wire.rs"]
mod wire;
pub use wire::{
    decode, encode, read_message, read_request, write_message, write_response, ProtocolError,
    DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE,
};

/// Protocol version (from Cargo.toml)
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request from CLI to daemon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    /// Health check ping
    Ping,

    /// Version handshake
    Hello { version: String },

    /// Get daemon status
    Status,

    /// Get the current schedule configuration
    GetConfig,

    /// Replace the schedule configuration
    SetConfig { config: ScheduleConfig },

    /// Manually request a clock action
    Trigger { kind: TriggerKind },

    /// Request daemon shutdown
    Shutdown,
}

/// Response from daemon to CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    /// Ping response
    Pong,

    /// Version handshake response
    Hello { version: String },

    /// Generic success
    Ok,

    /// Daemon status report
    Status { report: StatusReport },

    /// Current schedule configuration
    Config { config: ScheduleConfig },

    /// Error response
    Error { message: String },

    /// Daemon is shutting down
    ShuttingDown,
}

/// Snapshot of daemon state for `punch status`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusReport {
    /// One-line summary of the schedule and guard
    pub summary: String,
    /// Current guard phase
    pub guard: GuardState,
    /// Whether scheduled triggers are enabled
    pub enabled: bool,
    /// Next check-in alarm, RFC 3339, when scheduling is enabled
    pub next_check_in: Option<String>,
    /// Next check-out alarm, RFC 3339, when scheduling is enabled
    pub next_check_out: Option<String>,
    /// Whether the sleep inhibitor is currently held
    pub wake_lock_held: bool,
    /// Seconds since the daemon started
    pub uptime_secs: u64,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
