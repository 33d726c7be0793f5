// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn tracks_held_state() {
    let wake = FakeWakeLock::new();
    assert!(!wake.is_held());

    wake.acquire(Duration::from_secs(600)).await.unwrap();
    assert!(wake.is_held());

    wake.release().await.unwrap();
    assert!(!wake.is_held());
}

#[tokio::test]
async fn records_the_hold_bound() {
    let wake = FakeWakeLock::new();
    wake.acquire(Duration::from_secs(600)).await.unwrap();
    wake.release().await.unwrap();

    assert_eq!(
        wake.calls(),
        vec![
            WakeCall::Acquire {
                max_hold: Duration::from_secs(600)
            },
            WakeCall::Release,
        ]
    );
}
