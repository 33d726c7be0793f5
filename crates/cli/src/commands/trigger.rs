// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `punch test` - run a clock action on demand

use anyhow::Result;

use crate::client::DaemonClient;
use punch_core::TriggerKind;
use punch_daemon::Request;

pub async fn test() -> Result<()> {
    let client = DaemonClient::connect_or_start()?;
    client
        .send_expect_ok(&Request::Trigger {
            kind: TriggerKind::Test,
        })
        .await?;
    println!("clock action requested (a randomized delay may apply)");
    Ok(())
}
