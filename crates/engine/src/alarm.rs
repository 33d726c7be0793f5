// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock alarm arithmetic.
//!
//! Maps a configured HH:MM to the duration until its next occurrence:
//! today if the time is still ahead, otherwise tomorrow.

use chrono::{DateTime, Days, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};
use punch_core::ClockTime;
use std::time::Duration;

/// Fallback when no occurrence resolves (pathological DST configuration).
const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// The next local occurrence of `at`, strictly after `now`.
///
/// Strictness matters: an alarm re-arms at the moment it fires, and the
/// re-arm must land on tomorrow, not on the instant that just fired. A
/// nonexistent local time (DST gap) skips to the next day that has it.
pub fn next_occurrence(now: DateTime<Local>, at: ClockTime) -> Option<DateTime<Local>> {
    let time = at.naive();
    for days in 0..=2u64 {
        let date = now.date_naive().checked_add_days(Days::new(days))?;
        if let Some(candidate) = resolve_local(date, time) {
            if candidate > now {
                return Some(candidate);
            }
        }
    }
    None
}

/// Duration from `now` until the next occurrence of `at`.
pub fn until_next(now: DateTime<Local>, at: ClockTime) -> Duration {
    match next_occurrence(now, at) {
        Some(dt) => (dt - now).to_std().unwrap_or(Duration::ZERO),
        None => ONE_DAY,
    }
}

fn resolve_local(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Some(dt),
        // On a fall-back transition the earlier instant matches the user's
        // "first time the clock shows HH:MM" expectation.
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => None,
    }
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
