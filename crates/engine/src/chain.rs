// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed action chain and its effect builders.
//!
//! A guarded attempt is a short ordered sequence of time-delayed steps:
//! launch the target app, dwell, try to return to the host app, settle,
//! finish. The sequence is a static table executed by a single driver in the
//! runtime that advances an index and schedules only the next step's timer,
//! so the delays are auditable in one place and there is no callback
//! nesting.

use punch_core::{AttemptOutcome, Effect, Event, GuardBusy, TimerId, TriggerKind};
use std::time::Duration;

/// How long the target app keeps the foreground before we try to return.
pub const DWELL: Duration = Duration::from_secs(13);

/// Pause after the return attempt before the attempt is marked finished.
pub const SETTLE: Duration = Duration::from_secs(2);

/// Delay between an attempt finishing and the guard returning to idle.
pub const COOLDOWN: Duration = Duration::from_secs(3);

/// Safety bound on the sleep inhibitor held across an attempt.
pub const WAKE_LOCK_MAX: Duration = Duration::from_secs(10 * 60);

/// What the driver does when a chain step's timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAction {
    /// Try the primary return-to-host method, falling back to the secondary
    ReturnToHost,
    /// Mark the attempt finished and start the cooldown
    Finish,
}

/// One entry in the step table.
#[derive(Debug, Clone, Copy)]
pub struct ChainStep {
    pub action: ChainAction,
    /// Delay between the previous step completing and this one running
    pub delay: Duration,
}

/// The step table. Step 0's delay runs from the target-app launch.
pub const CHAIN: &[ChainStep] = &[
    ChainStep {
        action: ChainAction::ReturnToHost,
        delay: DWELL,
    },
    ChainStep {
        action: ChainAction::Finish,
        delay: SETTLE,
    },
];

/// Cursor over [`CHAIN`] for the attempt currently holding the guard.
#[derive(Debug, Clone, Copy)]
pub struct ChainRun {
    pub kind: TriggerKind,
    /// Index of the next step to run
    pub step: usize,
    /// Set when both return-to-host methods failed
    pub return_failed: bool,
}

impl ChainRun {
    pub fn new(kind: TriggerKind) -> Self {
        Self {
            kind,
            step: 0,
            return_failed: false,
        }
    }
}

/// Build effects to start an attempt: notify, launch, arm the first step.
pub fn launch_effects(kind: TriggerKind, target_app: &str) -> Vec<Effect> {
    vec![
        Effect::Notify {
            title: kind.label(),
            message: format!(
                "launching {}, returning in {}s",
                target_app,
                DWELL.as_secs()
            ),
        },
        Effect::LaunchApp {
            app: target_app.to_string(),
        },
        Effect::SetTimer {
            id: TimerId::chain(kind, 0),
            duration: CHAIN[0].delay,
        },
    ]
}

/// Build effects for the terminal step of an attempt (success or failure).
///
/// Every path through an attempt ends here: the wake lock is released, the
/// cooldown timer is armed so the guard reaches idle, and the outcome is
/// fed back as an event. No failure leaves the guard stuck.
pub fn finish_effects(kind: TriggerKind, outcome: AttemptOutcome) -> Vec<Effect> {
    let message = match outcome {
        AttemptOutcome::Completed => format!("{} completed", kind.label()),
        AttemptOutcome::TargetMissing => {
            format!("{} failed: target app is not installed", kind.label())
        }
        AttemptOutcome::LaunchFailed => {
            format!("{} failed: target app could not be launched", kind.label())
        }
        AttemptOutcome::ReturnFailed => format!(
            "{} completed, but returning to the host app failed",
            kind.label()
        ),
    };
    vec![
        Effect::Notify {
            title: kind.label(),
            message,
        },
        Effect::ReleaseWakeLock,
        Effect::SetTimer {
            id: TimerId::cooldown(kind),
            duration: COOLDOWN,
        },
        Effect::Emit {
            event: Event::AttemptFinished { kind, outcome },
        },
    ]
}

/// Build effects for a trigger rejected by the busy guard (drop-newest).
pub fn reject_effects(kind: TriggerKind, busy: &GuardBusy) -> Vec<Effect> {
    vec![Effect::Notify {
        title: kind.label(),
        message: format!("dropped: {}", busy),
    }]
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
