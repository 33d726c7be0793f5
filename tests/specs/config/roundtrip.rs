// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule persistence: TOML round-trips, defaults, and validation.

use punch_core::{ClockTime, ScheduleConfig};

#[test]
fn saved_config_loads_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.toml");

    let config = ScheduleConfig {
        check_in: ClockTime::new(8, 45).unwrap(),
        check_out: ClockTime::new(17, 30).unwrap(),
        enabled: true,
        max_jitter_secs: 90,
        target_app: "dingtalk".to_string(),
        host_app: "punch".to_string(),
    };
    config.save(&path).unwrap();

    assert_eq!(ScheduleConfig::load(&path).unwrap(), config);
}

#[test]
fn times_serialize_as_hh_mm_strings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.toml");

    ScheduleConfig::default().save(&path).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains(r#"check_in = "09:00""#));
    assert!(raw.contains(r#"check_out = "18:00""#));
}

#[test]
fn missing_file_yields_the_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = ScheduleConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded, ScheduleConfig::default());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.toml");
    std::fs::write(&path, "enabled = true\nmax_jitter_secs = 15\n").unwrap();

    let loaded = ScheduleConfig::load(&path).unwrap();
    assert!(loaded.enabled);
    assert_eq!(loaded.max_jitter_secs, 15);
    assert_eq!(loaded.check_in, ClockTime::new(9, 0).unwrap());
    assert_eq!(loaded.target_app, "dingtalk");
}

#[test]
fn out_of_range_time_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.toml");
    std::fs::write(&path, r#"check_in = "24:00""#).unwrap();
    assert!(ScheduleConfig::load(&path).is_err());
}
