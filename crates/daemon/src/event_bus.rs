// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus for daemon communication.
//!
//! A bounded in-memory channel between event producers (listener
//! connections, timer checks, the runtime's own result events) and the
//! engine loop. Events are not persisted: every event in this system is
//! either re-derivable from the config file at startup (alarms) or tied
//! to an attempt that does not survive a restart.

use punch_core::Event;
use thiserror::Error;
use tokio::sync::mpsc;

/// Channel capacity. Event volume is tiny (a handful per attempt), so a
/// full channel means the engine loop has stalled.
const BUS_CAPACITY: usize = 256;

/// Error returned when an event cannot be enqueued.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("event bus is full")]
    Full,
    #[error("event bus is closed")]
    Closed,
}

/// Sending half of the event bus.
#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::Sender<Event>,
}

/// Receiving half, owned by the engine loop.
pub struct EventReader {
    rx: mpsc::Receiver<Event>,
}

impl EventBus {
    /// Create a new event bus, returning the bus (for sending) and the
    /// reader (for the engine loop).
    pub fn new() -> (Self, EventReader) {
        let (tx, rx) = mpsc::channel(BUS_CAPACITY);
        (Self { tx }, EventReader { rx })
    }

    /// Enqueue an event without blocking.
    pub fn send(&self, event: Event) -> Result<(), BusError> {
        self.tx.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => BusError::Full,
            mpsc::error::TrySendError::Closed(_) => BusError::Closed,
        })
    }
}

impl EventReader {
    /// Wait for the next event.
    ///
    /// Returns `None` when every `EventBus` handle has been dropped.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

#[cfg(test)]
#[path = "event_bus_tests.rs"]
mod tests;
