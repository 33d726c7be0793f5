// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A full scheduled day: both alarms fire, run their chains, and re-arm.

use crate::prelude::*;
use punch_core::{AttemptOutcome, Event, GuardState, ScheduleConfig, TimerId, TriggerKind};
use punch_engine::chain;
use std::time::Duration;

const HOUR: Duration = Duration::from_secs(60 * 60);

#[tokio::test]
async fn enabled_schedule_runs_check_in_and_check_out() {
    // 08:00; defaults are check-in 09:00, check-out 18:00
    let config = ScheduleConfig {
        enabled: true,
        max_jitter_secs: 0,
        ..ScheduleConfig::default()
    };
    let h = harness_at("2026-03-02T08:00:00", config.clone());
    h.reconfigure(config).await;

    // 09:00: check-in fires and runs the whole chain
    h.tick(HOUR).await;
    assert_eq!(
        h.runtime.guard_state(),
        GuardState::Running {
            kind: TriggerKind::CheckIn
        }
    );
    let handled = h.run_chain_to_idle().await;
    assert!(handled.contains(&Event::AttemptFinished {
        kind: TriggerKind::CheckIn,
        outcome: AttemptOutcome::Completed,
    }));
    assert_eq!(h.runtime.guard_state(), GuardState::Idle);

    // 18:00: check-out fires. The chain consumed 18s of the clock already.
    let elapsed = chain::DWELL + chain::SETTLE + chain::COOLDOWN;
    h.tick(9 * HOUR - elapsed).await;
    let handled = h.run_chain_to_idle().await;
    assert!(handled.contains(&Event::AttemptFinished {
        kind: TriggerKind::CheckOut,
        outcome: AttemptOutcome::Completed,
    }));

    // Each attempt launched the target then returned to the host
    let launches: Vec<_> = h
        .launcher
        .calls()
        .into_iter()
        .map(|c| c.app)
        .collect();
    assert_eq!(launches, vec!["dingtalk", "punch", "dingtalk", "punch"]);

    // Both alarms re-armed for tomorrow
    let scheduler = h.runtime.scheduler();
    let scheduler = scheduler.lock();
    assert!(scheduler
        .deadline(&TimerId::alarm(TriggerKind::CheckIn))
        .is_some());
    assert!(scheduler
        .deadline(&TimerId::alarm(TriggerKind::CheckOut))
        .is_some());
}

#[tokio::test]
async fn scheduled_alarm_applies_the_jitter_window() {
    let config = ScheduleConfig {
        enabled: true,
        max_jitter_secs: 60,
        ..ScheduleConfig::default()
    };
    let h = harness_at("2026-03-02T08:00:00", config.clone());
    h.reconfigure(config).await;

    // 09:00 arrives: the alarm fires and either arms a jitter timer within
    // the bound or (zero draw) starts the attempt at once.
    h.tick(HOUR).await;
    let scheduler = h.runtime.scheduler();
    let deadline = scheduler
        .lock()
        .deadline(&TimerId::jitter(TriggerKind::CheckIn));
    match deadline {
        Some(fires_at) => {
            assert!(fires_at <= h.clock.now() + Duration::from_secs(60));
            assert!(h.launcher.calls().is_empty());
        }
        None => assert_eq!(h.launcher.calls().len(), 1),
    }

    // Either way the attempt has started once the window closes
    h.tick(Duration::from_secs(60)).await;
    assert_eq!(
        h.runtime.guard_state(),
        GuardState::Running {
            kind: TriggerKind::CheckIn
        }
    );
}

#[tokio::test]
async fn disabling_mid_day_cancels_the_remaining_alarm() {
    let config = ScheduleConfig {
        enabled: true,
        max_jitter_secs: 0,
        ..ScheduleConfig::default()
    };
    let h = harness_at("2026-03-02T08:00:00", config.clone());
    h.reconfigure(config).await;

    h.reconfigure(ScheduleConfig::default()).await;

    // 18:00 passes without a check-out attempt
    h.tick(10 * HOUR).await;
    assert!(h.launcher.calls().is_empty());
    assert_eq!(h.runtime.guard_state(), GuardState::Idle);
}

#[tokio::test]
async fn notifications_announce_launch_and_completion() {
    let h = harness_at("2026-03-02T08:00:00", no_jitter_config());

    h.request(TriggerKind::Test).await;
    h.run_chain_to_idle().await;

    let messages: Vec<_> = h.notifier.calls().into_iter().map(|c| c.message).collect();
    assert!(messages.iter().any(|m| m.contains("launching dingtalk")));
    assert!(messages.iter().any(|m| m.contains("completed")));
}
