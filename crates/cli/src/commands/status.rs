// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `punch status` - daemon status and next scheduled actions

use anyhow::Result;

use crate::client::{ClientError, DaemonClient};
use punch_daemon::{Request, Response, StatusReport};

pub async fn status() -> Result<()> {
    let client = match DaemonClient::connect() {
        Ok(c) => c,
        Err(ClientError::DaemonNotRunning) => {
            println!("punchd: not running");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let report = match client.send(&Request::Status).await {
        Ok(Response::Status { report }) => report,
        Ok(_) => return Err(ClientError::UnexpectedResponse.into()),
        Err(ClientError::Io(ref e))
            if matches!(
                e.kind(),
                std::io::ErrorKind::ConnectionRefused | std::io::ErrorKind::NotFound
            ) =>
        {
            println!("punchd: not running");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print!("{}", format_report(&report));
    Ok(())
}

fn format_report(report: &StatusReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("punchd: up {}\n", format_uptime(report.uptime_secs)));
    out.push_str(&format!("  {}\n", report.summary));

    if report.enabled {
        out.push_str(&format!(
            "  next check-in:  {}\n",
            report.next_check_in.as_deref().unwrap_or("-")
        ));
        out.push_str(&format!(
            "  next check-out: {}\n",
            report.next_check_out.as_deref().unwrap_or("-")
        ));
    } else {
        out.push_str("  schedule disabled (run `punch enable`)\n");
    }

    if report.wake_lock_held {
        out.push_str("  sleep inhibitor: held\n");
    }
    out
}

fn format_uptime(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
