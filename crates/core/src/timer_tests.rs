// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn constructors_encode_kind_and_stage() {
    assert_eq!(TimerId::alarm(TriggerKind::CheckIn), "alarm:check-in");
    assert_eq!(TimerId::jitter(TriggerKind::CheckOut), "jitter:check-out");
    assert_eq!(TimerId::chain(TriggerKind::Test, 1), "chain:test:1");
    assert_eq!(TimerId::cooldown(TriggerKind::CheckIn), "cooldown:check-in");
}

#[test]
fn stage_predicates() {
    assert!(TimerId::alarm(TriggerKind::CheckIn).is_alarm());
    assert!(TimerId::jitter(TriggerKind::CheckIn).is_jitter());
    assert!(TimerId::chain(TriggerKind::CheckIn, 0).is_chain());
    assert!(TimerId::cooldown(TriggerKind::CheckIn).is_cooldown());
    assert!(!TimerId::alarm(TriggerKind::CheckIn).is_jitter());
}

#[test]
fn kind_extraction() {
    assert_eq!(
        TimerId::alarm(TriggerKind::CheckOut).kind(),
        Some(TriggerKind::CheckOut)
    );
    assert_eq!(
        TimerId::chain(TriggerKind::Test, 3).kind(),
        Some(TriggerKind::Test)
    );
    assert_eq!(TimerId::new("alarm:lunch").kind(), None);
    assert_eq!(TimerId::new("bare").kind(), None);
}

#[test]
fn chain_step_extraction() {
    assert_eq!(TimerId::chain(TriggerKind::CheckIn, 0).chain_step(), Some(0));
    assert_eq!(TimerId::chain(TriggerKind::Test, 7).chain_step(), Some(7));
    assert_eq!(TimerId::alarm(TriggerKind::CheckIn).chain_step(), None);
    assert_eq!(TimerId::new("chain:test:x").chain_step(), None);
}

#[test]
fn display_and_str_equality() {
    let id = TimerId::jitter(TriggerKind::Test);
    assert_eq!(id.to_string(), "jitter:test");
    assert_eq!(id, "jitter:test");
    assert_eq!(id.as_str(), "jitter:test");
}
