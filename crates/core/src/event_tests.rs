// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn events_serialize_with_type_tag() {
    let event = Event::TriggerRequested {
        kind: TriggerKind::CheckIn,
        jitter_applied: true,
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "trigger:requested",
            "kind": "check_in",
            "jitter_applied": true,
        })
    );
}

#[test]
fn trigger_requested_defaults_jitter_applied_to_false() {
    let event: Event =
        serde_json::from_value(json!({"type": "trigger:requested", "kind": "test"})).unwrap();
    assert_eq!(
        event,
        Event::TriggerRequested {
            kind: TriggerKind::Test,
            jitter_applied: false,
        }
    );
}

#[test]
fn timer_fired_round_trips() {
    let event = Event::TimerFired {
        id: TimerId::alarm(TriggerKind::CheckOut),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn config_changed_round_trips() {
    let event = Event::ConfigChanged {
        config: ScheduleConfig::default(),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn log_summary_names_the_event() {
    let event = Event::AttemptFinished {
        kind: TriggerKind::Test,
        outcome: AttemptOutcome::ReturnFailed,
    };
    assert_eq!(event.log_summary(), "attempt:finished test (return failed)");
    assert_eq!(Event::Shutdown.log_summary(), "shutdown");
}
