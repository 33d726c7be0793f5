// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use punch_core::TriggerKind;

#[tokio::test]
async fn events_arrive_in_order() {
    let (bus, mut reader) = EventBus::new();

    bus.send(Event::TriggerRequested {
        kind: TriggerKind::Test,
        jitter_applied: false,
    })
    .unwrap();
    bus.send(Event::Shutdown).unwrap();

    assert_eq!(
        reader.recv().await,
        Some(Event::TriggerRequested {
            kind: TriggerKind::Test,
            jitter_applied: false,
        })
    );
    assert_eq!(reader.recv().await, Some(Event::Shutdown));
}

#[tokio::test]
async fn dropped_senders_close_the_reader() {
    let (bus, mut reader) = EventBus::new();
    drop(bus);
    assert_eq!(reader.recv().await, None);
}

#[tokio::test]
async fn send_after_reader_dropped_is_an_error() {
    let (bus, reader) = EventBus::new();
    drop(reader);
    assert!(matches!(bus.send(Event::Shutdown), Err(BusError::Closed)));
}
