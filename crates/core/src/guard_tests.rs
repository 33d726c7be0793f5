// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn full_cycle_idle_running_cooldown_idle() {
    let mut guard = ExecutionGuard::new();
    assert_eq!(guard.state(), GuardState::Idle);
    assert_eq!(guard.current(), None);

    guard.try_begin(TriggerKind::CheckIn).unwrap();
    assert_eq!(
        guard.state(),
        GuardState::Running {
            kind: TriggerKind::CheckIn
        }
    );
    assert_eq!(guard.current(), Some(TriggerKind::CheckIn));

    assert!(guard.finish());
    assert_eq!(
        guard.state(),
        GuardState::Cooldown {
            kind: TriggerKind::CheckIn
        }
    );

    assert!(guard.release());
    assert_eq!(guard.state(), GuardState::Idle);
}

#[test]
fn busy_running_guard_drops_new_trigger_and_keeps_kind() {
    let mut guard = ExecutionGuard::new();
    guard.try_begin(TriggerKind::CheckIn).unwrap();

    let err = guard.try_begin(TriggerKind::CheckOut).unwrap_err();
    assert_eq!(err.current, TriggerKind::CheckIn);
    assert_eq!(err.phase, "running");

    // Stored kind untouched by the rejected trigger
    assert_eq!(guard.current(), Some(TriggerKind::CheckIn));
}

#[test]
fn cooldown_guard_also_rejects() {
    let mut guard = ExecutionGuard::new();
    guard.try_begin(TriggerKind::Test).unwrap();
    guard.finish();

    let err = guard.try_begin(TriggerKind::Test).unwrap_err();
    assert_eq!(err.phase, "cooling down");
    assert_eq!(err.current, TriggerKind::Test);
}

#[test]
fn guard_reusable_after_release() {
    let mut guard = ExecutionGuard::new();
    guard.try_begin(TriggerKind::CheckIn).unwrap();
    guard.finish();
    guard.release();

    assert!(guard.try_begin(TriggerKind::CheckOut).is_ok());
    assert_eq!(guard.current(), Some(TriggerKind::CheckOut));
}

#[test]
fn finish_from_idle_is_a_no_op() {
    let mut guard = ExecutionGuard::new();
    assert!(!guard.finish());
    assert_eq!(guard.state(), GuardState::Idle);
}

#[test]
fn finish_from_cooldown_is_a_no_op() {
    let mut guard = ExecutionGuard::new();
    guard.try_begin(TriggerKind::Test).unwrap();
    guard.finish();

    assert!(!guard.finish());
    assert_eq!(
        guard.state(),
        GuardState::Cooldown {
            kind: TriggerKind::Test
        }
    );
}

#[test]
fn release_outside_cooldown_is_a_no_op() {
    let mut guard = ExecutionGuard::new();
    assert!(!guard.release());
    assert_eq!(guard.state(), GuardState::Idle);

    guard.try_begin(TriggerKind::CheckIn).unwrap();
    assert!(!guard.release());
    assert_eq!(
        guard.state(),
        GuardState::Running {
            kind: TriggerKind::CheckIn
        }
    );
}

#[test]
fn busy_error_message_names_the_holder() {
    let mut guard = ExecutionGuard::new();
    guard.try_begin(TriggerKind::CheckOut).unwrap();
    let err = guard.try_begin(TriggerKind::Test).unwrap_err();
    assert_eq!(err.to_string(), "check-out already in progress (running)");
}
