// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for the punch engine.
//!
//! The runtime owns the execution guard, the in-flight chain cursor and the
//! current configuration, and turns incoming events into effects. All event
//! handling is sequential: the daemon loop calls [`Runtime::handle_event`]
//! one event at a time, so guard transitions never race.

use crate::alarm;
use crate::chain::{self, ChainAction, ChainRun, CHAIN};
use crate::error::RuntimeError;
use crate::executor::Executor;
use crate::jitter;
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use punch_adapters::{LauncherAdapter, NotifyAdapter, WakeLockAdapter};
use punch_core::{
    AttemptOutcome, Clock, Effect, Event, ExecutionGuard, GuardState, ScheduleConfig, TimerId,
    TriggerKind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

/// Wall-clock drift below this is timer-check noise, not a clock change.
const ALARM_RESYNC_TOLERANCE: Duration = Duration::from_secs(2);

/// Runtime adapter dependencies
pub struct RuntimeDeps<L, N, W> {
    pub launcher: L,
    pub notifier: N,
    pub wake: W,
}

/// Runtime that coordinates the system
pub struct Runtime<L, N, W, C: Clock> {
    executor: Executor<L, N, W, C>,
    guard: Mutex<ExecutionGuard>,
    chain_run: Mutex<Option<ChainRun>>,
    config: Mutex<ScheduleConfig>,
    rng: Mutex<StdRng>,
}

impl<L, N, W, C> Runtime<L, N, W, C>
where
    L: LauncherAdapter,
    N: NotifyAdapter,
    W: WakeLockAdapter,
    C: Clock,
{
    /// Create a new runtime with an OS-seeded jitter source
    pub fn new(deps: RuntimeDeps<L, N, W>, clock: C, config: ScheduleConfig) -> Self {
        Self::with_rng(deps, clock, config, StdRng::from_os_rng())
    }

    /// Create a new runtime with an explicit jitter source
    pub fn with_rng(
        deps: RuntimeDeps<L, N, W>,
        clock: C,
        config: ScheduleConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            executor: Executor::new(deps.launcher, deps.notifier, deps.wake, clock),
            guard: Mutex::new(ExecutionGuard::new()),
            chain_run: Mutex::new(None),
            config: Mutex::new(config),
            rng: Mutex::new(rng),
        }
    }

    /// Get a reference to the clock
    pub fn clock(&self) -> &C {
        self.executor.clock()
    }

    /// Get a shared reference to the scheduler (for timer checking in the daemon loop)
    pub fn scheduler(&self) -> Arc<parking_lot::Mutex<crate::Scheduler>> {
        self.executor.scheduler()
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> ScheduleConfig {
        self.config.lock().clone()
    }

    /// Current guard phase
    pub fn guard_state(&self) -> GuardState {
        self.guard.lock().state()
    }

    /// Whether the sleep inhibitor is currently held
    pub fn wake_lock_held(&self) -> bool {
        self.executor.wake_lock_held()
    }

    /// Next wall-clock occurrence of a trigger's alarm, if it has one
    pub fn next_occurrence(&self, kind: TriggerKind) -> Option<DateTime<Local>> {
        let at = self.config.lock().time_for(kind)?;
        alarm::next_occurrence(self.clock().wall_time(), at)
    }

    /// One-line status summary for the CLI
    pub fn status_line(&self) -> String {
        let config = self.config.lock().clone();
        let guard = self.guard.lock().state();
        format!(
            "{} | check-in {} | check-out {} | jitter <= {}s | guard {}",
            if config.enabled { "enabled" } else { "disabled" },
            config.check_in,
            config.check_out,
            config.max_jitter_secs,
            guard
        )
    }

    /// Arm the daily alarms for both scheduled trigger kinds.
    ///
    /// No-op while scheduling is disabled. Called at daemon startup and
    /// after every configuration change.
    pub async fn arm_alarms(&self) -> Result<Vec<Event>, RuntimeError> {
        let mut events = self.arm_alarm(TriggerKind::CheckIn).await?;
        events.extend(self.arm_alarm(TriggerKind::CheckOut).await?);
        Ok(events)
    }

    /// Re-derive the daily alarm deadlines from the wall clock.
    ///
    /// Alarms are armed as monotonic durations, so a wall-clock change
    /// while one is pending (a DST shift, a manual adjustment) would leave
    /// it firing at the wrong local time. The daemon calls this from its
    /// periodic timer check.
    pub fn resync_alarms(&self) {
        let config = self.config.lock().clone();
        if !config.enabled {
            return;
        }

        let scheduler = self.executor.scheduler();
        let mut scheduler = scheduler.lock();
        let now = self.clock().now();
        let wall = self.clock().wall_time();

        for kind in [TriggerKind::CheckIn, TriggerKind::CheckOut] {
            let id = TimerId::alarm(kind);
            let Some(deadline) = scheduler.deadline(&id) else {
                continue;
            };
            // Already due; the timer check will fire it this tick
            if deadline <= now {
                continue;
            }
            let Some(at) = config.time_for(kind) else {
                continue;
            };

            let wait = alarm::until_next(wall, at);
            let armed = deadline - now;
            let drift = if armed > wait { armed - wait } else { wait - armed };
            if drift > ALARM_RESYNC_TOLERANCE {
                tracing::info!(
                    kind = %kind,
                    drift_secs = drift.as_secs(),
                    "wall clock moved, alarm resynced"
                );
                scheduler.set_timer(id, wait, now);
            }
        }
    }

    /// Handle an incoming event and return any produced events
    pub async fn handle_event(&self, event: Event) -> Result<Vec<Event>, RuntimeError> {
        match &event {
            Event::TimerFired { id } => self.handle_timer_fired(id).await,

            Event::TriggerRequested {
                kind,
                jitter_applied,
            } => {
                if *jitter_applied {
                    self.begin_attempt(*kind).await
                } else {
                    self.schedule_with_jitter(*kind).await
                }
            }

            Event::ConfigChanged { config } => self.handle_config_changed(config).await,

            Event::AttemptFinished { kind, outcome } => {
                tracing::info!(kind = %kind, outcome = %outcome, "attempt finished");
                Ok(Vec::new())
            }

            Event::Shutdown => Ok(Vec::new()),
        }
    }

    async fn handle_timer_fired(&self, id: &TimerId) -> Result<Vec<Event>, RuntimeError> {
        if id.is_alarm() {
            self.handle_alarm_fired(id).await
        } else if id.is_jitter() {
            match id.kind() {
                Some(kind) => Ok(vec![Event::TriggerRequested {
                    kind,
                    jitter_applied: true,
                }]),
                None => {
                    tracing::warn!(timer = %id, "jitter timer with no trigger kind");
                    Ok(Vec::new())
                }
            }
        } else if id.is_chain() {
            self.handle_chain_fired(id).await
        } else if id.is_cooldown() {
            if !self.guard.lock().release() {
                tracing::warn!(timer = %id, "cooldown fired with guard not cooling down");
            }
            Ok(Vec::new())
        } else {
            tracing::warn!(timer = %id, "unknown timer fired");
            Ok(Vec::new())
        }
    }

    /// A daily alarm fired: re-arm it for tomorrow, then start the
    /// jittered trigger path.
    async fn handle_alarm_fired(&self, id: &TimerId) -> Result<Vec<Event>, RuntimeError> {
        let Some(kind) = id.kind() else {
            tracing::warn!(timer = %id, "alarm timer with no trigger kind");
            return Ok(Vec::new());
        };

        let mut events = self.arm_alarm(kind).await?;
        events.extend(self.schedule_with_jitter(kind).await?);
        Ok(events)
    }

    async fn arm_alarm(&self, kind: TriggerKind) -> Result<Vec<Event>, RuntimeError> {
        let config = self.config.lock().clone();
        if !config.enabled {
            return Ok(Vec::new());
        }
        let Some(at) = config.time_for(kind) else {
            return Ok(Vec::new());
        };

        let wait = alarm::until_next(self.clock().wall_time(), at);
        tracing::info!(kind = %kind, at = %at, wait_secs = wait.as_secs(), "alarm armed");
        self.execute_all(vec![Effect::SetTimer {
            id: TimerId::alarm(kind),
            duration: wait,
        }])
        .await
    }

    /// Pick a randomized delay for the trigger. A zero delay begins the
    /// attempt immediately; otherwise the jitter timer carries it.
    async fn schedule_with_jitter(&self, kind: TriggerKind) -> Result<Vec<Event>, RuntimeError> {
        let max = self.config.lock().max_jitter_secs;
        let delay = {
            let mut rng = self.rng.lock();
            jitter::pick_delay(max, &mut *rng)
        };

        if delay.is_zero() {
            return self.begin_attempt(kind).await;
        }

        tracing::info!(kind = %kind, delay_secs = delay.as_secs(), "trigger delayed by jitter");
        self.execute_all(vec![
            Effect::Notify {
                title: kind.label(),
                message: format!("scheduled in {}s", delay.as_secs()),
            },
            Effect::SetTimer {
                id: TimerId::jitter(kind),
                duration: delay,
            },
        ])
        .await
    }

    /// Try to claim the guard and start the action chain.
    async fn begin_attempt(&self, kind: TriggerKind) -> Result<Vec<Event>, RuntimeError> {
        // Bind the claim first; an `if let` on the lock call would hold
        // the guard lock across the awaits in the reject path.
        let claimed = self.guard.lock().try_begin(kind);
        if let Err(busy) = claimed {
            tracing::info!(kind = %kind, busy = %busy, "trigger dropped, guard busy");
            return self.execute_all(chain::reject_effects(kind, &busy)).await;
        }

        let target = self.config.lock().target_app.clone();
        if !self.executor.app_installed(&target).await {
            tracing::warn!(kind = %kind, app = %target, "target app not installed");
            return self.finish_attempt(kind, AttemptOutcome::TargetMissing).await;
        }

        self.executor
            .execute(Effect::AcquireWakeLock {
                max_hold: chain::WAKE_LOCK_MAX,
            })
            .await?;

        let mut events = Vec::new();
        for effect in chain::launch_effects(kind, &target) {
            match self.executor.execute(effect).await {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(kind = %kind, error = %e, "target launch failed");
                    return self.finish_attempt(kind, AttemptOutcome::LaunchFailed).await;
                }
            }
        }

        *self.chain_run.lock() = Some(ChainRun::new(kind));
        Ok(events)
    }

    /// A chain step timer fired: run the step and arm the next one.
    async fn handle_chain_fired(&self, id: &TimerId) -> Result<Vec<Event>, RuntimeError> {
        let (Some(kind), Some(step)) = (id.kind(), id.chain_step()) else {
            tracing::warn!(timer = %id, "malformed chain timer id");
            return Ok(Vec::new());
        };

        // Copy the cursor out; the lock must not be held across awaits.
        let run = {
            let slot = self.chain_run.lock();
            match *slot {
                Some(run) if run.kind == kind && run.step == step => run,
                ref other => {
                    tracing::warn!(timer = %id, run = ?other, "stray chain timer ignored");
                    return Ok(Vec::new());
                }
            }
        };

        let Some(entry) = CHAIN.get(step) else {
            tracing::warn!(timer = %id, "chain timer past the end of the table");
            return Ok(Vec::new());
        };

        match entry.action {
            ChainAction::ReturnToHost => {
                let host = self.config.lock().host_app.clone();
                let returned = self.return_to_host(&host).await;

                let mut run = run;
                run.return_failed = !returned;
                run.step += 1;
                *self.chain_run.lock() = Some(run);

                if let Some(next) = CHAIN.get(run.step) {
                    self.executor
                        .execute(Effect::SetTimer {
                            id: TimerId::chain(kind, run.step),
                            duration: next.delay,
                        })
                        .await?;
                }
                Ok(Vec::new())
            }

            ChainAction::Finish => {
                let outcome = if run.return_failed {
                    AttemptOutcome::ReturnFailed
                } else {
                    AttemptOutcome::Completed
                };
                self.finish_attempt(kind, outcome).await
            }
        }
    }

    /// Bring the host app back to the foreground: focus first, launch as
    /// the fallback. Returns false only when both methods failed.
    async fn return_to_host(&self, host: &str) -> bool {
        match self
            .executor
            .execute(Effect::FocusApp {
                app: host.to_string(),
            })
            .await
        {
            Ok(_) => true,
            Err(focus_err) => {
                tracing::info!(app = host, error = %focus_err, "focus failed, falling back to launch");
                match self
                    .executor
                    .execute(Effect::LaunchApp {
                        app: host.to_string(),
                    })
                    .await
                {
                    Ok(_) => true,
                    Err(launch_err) => {
                        tracing::warn!(app = host, error = %launch_err, "both return-to-host methods failed");
                        false
                    }
                }
            }
        }
    }

    /// Terminal step of every attempt, successful or not: move the guard
    /// to cooldown, drop the chain cursor, release the wake lock and arm
    /// the cooldown timer.
    async fn finish_attempt(
        &self,
        kind: TriggerKind,
        outcome: AttemptOutcome,
    ) -> Result<Vec<Event>, RuntimeError> {
        if !self.guard.lock().finish() {
            tracing::warn!(kind = %kind, "attempt finished with guard not running");
        }
        *self.chain_run.lock() = None;
        self.execute_all(chain::finish_effects(kind, outcome)).await
    }

    async fn handle_config_changed(
        &self,
        config: &ScheduleConfig,
    ) -> Result<Vec<Event>, RuntimeError> {
        *self.config.lock() = config.clone();

        // Pending alarms and jitter delays reflect the old schedule; an
        // in-flight chain and its cooldown are left to run out.
        {
            let scheduler = self.executor.scheduler();
            let mut scheduler = scheduler.lock();
            scheduler.cancel_timers_with_prefix("alarm:");
            scheduler.cancel_timers_with_prefix("jitter:");
        }

        if config.enabled {
            self.arm_alarms().await
        } else {
            tracing::info!("scheduling disabled");
            Ok(Vec::new())
        }
    }

    async fn execute_all(&self, effects: Vec<Effect>) -> Result<Vec<Event>, RuntimeError> {
        let mut events = Vec::new();
        for effect in effects {
            if let Some(event) = self.executor.execute(effect).await? {
                events.push(event);
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
