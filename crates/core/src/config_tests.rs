// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::trigger::TriggerKind;
use yare::parameterized;

#[parameterized(
    midnight = { 0, 0 },
    morning = { 9, 30 },
    last_minute = { 23, 59 },
)]
fn clock_time_accepts_valid_pairs(hour: u8, minute: u8) {
    let t = ClockTime::new(hour, minute).unwrap();
    assert_eq!(t.hour(), hour);
    assert_eq!(t.minute(), minute);
}

#[parameterized(
    hour_24 = { 24, 0 },
    minute_60 = { 9, 60 },
    both = { 99, 99 },
)]
fn clock_time_rejects_out_of_range(hour: u8, minute: u8) {
    assert!(ClockTime::new(hour, minute).is_err());
}

#[test]
fn clock_time_parses_and_displays() {
    let t: ClockTime = "09:05".parse().unwrap();
    assert_eq!(t.to_string(), "09:05");
    assert_eq!(t, ClockTime::new(9, 5).unwrap());
}

#[parameterized(
    missing_colon = { "0900" },
    empty = { "" },
    non_numeric = { "nine:00" },
    out_of_range = { "25:00" },
    negative = { "-1:30" },
)]
fn clock_time_parse_rejects_garbage(s: &str) {
    assert!(s.parse::<ClockTime>().is_err());
}

#[test]
fn defaults_match_the_out_of_box_schedule() {
    let config = ScheduleConfig::default();
    assert_eq!(config.check_in.to_string(), "09:00");
    assert_eq!(config.check_out.to_string(), "18:00");
    assert!(!config.enabled);
    assert_eq!(config.max_jitter_secs, 60);
}

#[test]
fn time_for_maps_scheduled_kinds_only() {
    let config = ScheduleConfig::default();
    assert_eq!(config.time_for(TriggerKind::CheckIn), Some(config.check_in));
    assert_eq!(
        config.time_for(TriggerKind::CheckOut),
        Some(config.check_out)
    );
    assert_eq!(config.time_for(TriggerKind::Test), None);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = ScheduleConfig {
        check_in: ClockTime::new(8, 45).unwrap(),
        check_out: ClockTime::new(17, 30).unwrap(),
        enabled: true,
        max_jitter_secs: 120,
        target_app: "dingtalk".to_string(),
        host_app: "punch".to_string(),
    };

    config.save(&path).unwrap();
    let loaded = ScheduleConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = ScheduleConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded, ScheduleConfig::default());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "enabled = true\nmax_jitter_secs = 5\n").unwrap();

    let loaded = ScheduleConfig::load(&path).unwrap();
    assert!(loaded.enabled);
    assert_eq!(loaded.max_jitter_secs, 5);
    assert_eq!(loaded.check_in, ScheduleConfig::default().check_in);
}

#[test]
fn invalid_time_in_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "check_in = \"25:00\"\n").unwrap();

    assert!(matches!(
        ScheduleConfig::load(&path),
        Err(ConfigError::Parse(_))
    ));
}
