// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn records_calls_in_order() {
    let launcher = FakeLauncher::new();
    launcher.launch("dingtalk").await.unwrap();
    launcher.focus("punch").await.unwrap();

    let calls = launcher.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].op, LaunchOp::Launch);
    assert_eq!(calls[0].app, "dingtalk");
    assert_eq!(calls[1].op, LaunchOp::Focus);
    assert_eq!(calls[1].app, "punch");
}

#[tokio::test]
async fn everything_installed_by_default() {
    let launcher = FakeLauncher::new();
    assert!(launcher.is_installed("anything").await);

    launcher.set_not_installed("dingtalk");
    assert!(!launcher.is_installed("dingtalk").await);
    assert!(launcher.is_installed("other").await);
}

#[tokio::test]
async fn failure_injection_is_per_app_and_per_op() {
    let launcher = FakeLauncher::new();
    launcher.fail_focus("punch");

    assert!(launcher.focus("punch").await.is_err());
    assert!(launcher.launch("punch").await.is_ok());
    assert!(launcher.focus("other").await.is_ok());
}
