// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight guard: overlapping triggers are dropped, never queued.

use crate::prelude::*;
use punch_core::{GuardState, TriggerKind};
use punch_engine::chain;

#[tokio::test]
async fn overlapping_trigger_is_dropped_not_queued() {
    let h = harness_at("2026-03-02T08:00:00", no_jitter_config());

    h.request(TriggerKind::CheckIn).await;
    h.request(TriggerKind::CheckOut).await;

    // The first attempt keeps running; the second left no trace beyond a
    // notification and never runs later.
    assert_eq!(
        h.runtime.guard_state(),
        GuardState::Running {
            kind: TriggerKind::CheckIn
        }
    );
    assert_eq!(h.launcher.calls().len(), 1);

    h.run_chain_to_idle().await;
    assert_eq!(h.runtime.guard_state(), GuardState::Idle);
    // Still just the one attempt's launches (target + host return)
    assert_eq!(h.launcher.calls().len(), 2);
}

#[tokio::test]
async fn cooldown_rejects_then_idle_accepts() {
    let h = harness_at("2026-03-02T08:00:00", no_jitter_config());

    h.request(TriggerKind::Test).await;
    h.tick(chain::DWELL).await;
    h.tick(chain::SETTLE).await;
    assert_eq!(
        h.runtime.guard_state(),
        GuardState::Cooldown {
            kind: TriggerKind::Test
        }
    );

    // During cooldown the guard still rejects
    let before = h.launcher.calls().len();
    h.request(TriggerKind::CheckIn).await;
    assert_eq!(h.launcher.calls().len(), before);

    // Once idle again a new trigger is accepted
    h.tick(chain::COOLDOWN).await;
    h.request(TriggerKind::CheckIn).await;
    assert_eq!(
        h.runtime.guard_state(),
        GuardState::Running {
            kind: TriggerKind::CheckIn
        }
    );
}

#[tokio::test]
async fn rejection_names_the_attempt_in_flight() {
    let h = harness_at("2026-03-02T08:00:00", no_jitter_config());

    h.request(TriggerKind::Test).await;
    h.request(TriggerKind::CheckIn).await;

    let dropped: Vec<_> = h
        .notifier
        .calls()
        .into_iter()
        .filter(|c| c.message.contains("dropped"))
        .collect();
    assert_eq!(dropped.len(), 1);
    assert!(dropped[0].message.contains("test"));
}

#[tokio::test]
async fn failed_attempt_still_releases_the_guard() {
    let h = harness_at("2026-03-02T08:00:00", no_jitter_config());
    h.launcher.fail_launch("dingtalk");

    h.request(TriggerKind::Test).await;
    h.tick(chain::COOLDOWN).await;

    assert_eq!(h.runtime.guard_state(), GuardState::Idle);
    assert!(!h.wake.is_held());
}
