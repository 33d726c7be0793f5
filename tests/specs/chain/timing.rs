// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The action chain's fixed delays, observed through timer deadlines.

use crate::prelude::*;
use punch_adapters::WakeCall;
use punch_core::{TimerId, TriggerKind};
use punch_engine::chain;
use std::time::Duration;

#[tokio::test]
async fn chain_steps_are_armed_one_at_a_time() {
    let h = harness_at("2026-03-02T08:00:00", no_jitter_config());

    h.request(TriggerKind::Test).await;

    // Only the dwell timer exists right after launch
    let scheduler = h.runtime.scheduler();
    {
        let scheduler = scheduler.lock();
        assert_eq!(
            scheduler.deadline(&TimerId::chain(TriggerKind::Test, 0)),
            Some(h.clock.now() + chain::DWELL)
        );
        assert!(scheduler
            .deadline(&TimerId::chain(TriggerKind::Test, 1))
            .is_none());
    }

    // Dwell elapses: the settle timer replaces it
    h.tick(chain::DWELL).await;
    {
        let scheduler = scheduler.lock();
        assert!(scheduler
            .deadline(&TimerId::chain(TriggerKind::Test, 0))
            .is_none());
        assert_eq!(
            scheduler.deadline(&TimerId::chain(TriggerKind::Test, 1)),
            Some(h.clock.now() + chain::SETTLE)
        );
    }

    // Settle elapses: only the cooldown timer remains
    h.tick(chain::SETTLE).await;
    {
        let scheduler = scheduler.lock();
        assert!(scheduler
            .deadline(&TimerId::chain(TriggerKind::Test, 1))
            .is_none());
        assert_eq!(
            scheduler.deadline(&TimerId::cooldown(TriggerKind::Test)),
            Some(h.clock.now() + chain::COOLDOWN)
        );
    }
}

#[tokio::test]
async fn wake_lock_brackets_the_attempt_with_a_bound() {
    let h = harness_at("2026-03-02T08:00:00", no_jitter_config());

    h.request(TriggerKind::Test).await;
    assert!(h.wake.is_held());

    h.tick(chain::DWELL).await;
    h.tick(chain::SETTLE).await;
    assert!(!h.wake.is_held());

    let calls = h.wake.calls();
    assert_eq!(
        calls,
        vec![
            WakeCall::Acquire {
                max_hold: Duration::from_secs(10 * 60)
            },
            WakeCall::Release,
        ]
    );
}

#[tokio::test]
async fn early_timer_does_not_fire_before_its_deadline() {
    let h = harness_at("2026-03-02T08:00:00", no_jitter_config());

    h.request(TriggerKind::Test).await;
    let handled = h.tick(chain::DWELL - Duration::from_secs(1)).await;

    assert!(handled.is_empty());
    // Still waiting on the dwell; only the launch happened
    assert_eq!(h.launcher.calls().len(), 1);
}
