// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `punch set` / `punch config` / `punch enable` / `punch disable`

use anyhow::{bail, Result};
use clap::Args;

use crate::client::{ClientError, DaemonClient};
use punch_core::{ClockTime, ScheduleConfig};
use punch_daemon::{Request, Response};

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Daily check-in time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub check_in: Option<String>,

    /// Daily check-out time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub check_out: Option<String>,

    /// Upper bound in seconds on the randomized delay (0 disables jitter)
    #[arg(long, value_name = "SECS")]
    pub jitter: Option<u32>,

    /// App id to launch for the clock action
    #[arg(long, value_name = "APP")]
    pub target: Option<String>,

    /// App id to return to after the clock action
    #[arg(long, value_name = "APP")]
    pub host: Option<String>,
}

impl SetArgs {
    fn is_empty(&self) -> bool {
        self.check_in.is_none()
            && self.check_out.is_none()
            && self.jitter.is_none()
            && self.target.is_none()
            && self.host.is_none()
    }
}

/// Merge the provided flags onto an existing configuration.
fn apply(args: &SetArgs, mut config: ScheduleConfig) -> Result<ScheduleConfig> {
    if let Some(ref s) = args.check_in {
        config.check_in = s.parse::<ClockTime>()?;
    }
    if let Some(ref s) = args.check_out {
        config.check_out = s.parse::<ClockTime>()?;
    }
    if let Some(jitter) = args.jitter {
        config.max_jitter_secs = jitter;
    }
    if let Some(ref target) = args.target {
        if target.is_empty() {
            bail!("--target must not be empty");
        }
        config.target_app = target.clone();
    }
    if let Some(ref host) = args.host {
        if host.is_empty() {
            bail!("--host must not be empty");
        }
        config.host_app = host.clone();
    }
    Ok(config)
}

pub async fn set(args: SetArgs) -> Result<()> {
    if args.is_empty() {
        bail!("nothing to set; see `punch set --help` for the available flags");
    }

    let client = DaemonClient::connect_or_start()?;
    let current = fetch_config(&client).await?;
    let updated = apply(&args, current)?;

    client
        .send_expect_ok(&Request::SetConfig {
            config: updated.clone(),
        })
        .await?;

    print_config(&updated);
    Ok(())
}

pub async fn set_enabled(enabled: bool) -> Result<()> {
    let client = DaemonClient::connect_or_start()?;
    let mut config = fetch_config(&client).await?;

    if config.enabled == enabled {
        println!(
            "schedule already {}",
            if enabled { "enabled" } else { "disabled" }
        );
        return Ok(());
    }

    config.enabled = enabled;
    client
        .send_expect_ok(&Request::SetConfig {
            config: config.clone(),
        })
        .await?;

    if enabled {
        println!(
            "schedule enabled: check-in {} / check-out {}",
            config.check_in, config.check_out
        );
    } else {
        println!("schedule disabled");
    }
    Ok(())
}

pub async fn show() -> Result<()> {
    let client = DaemonClient::connect_or_start()?;
    let config = fetch_config(&client).await?;
    print_config(&config);
    Ok(())
}

async fn fetch_config(client: &DaemonClient) -> Result<ScheduleConfig> {
    match client.send(&Request::GetConfig).await? {
        Response::Config { config } => Ok(config),
        _ => Err(ClientError::UnexpectedResponse.into()),
    }
}

fn print_config(config: &ScheduleConfig) {
    print!("{}", format_config(config));
}

fn format_config(config: &ScheduleConfig) -> String {
    format!(
        "schedule:  {}\n\
         check-in:  {}\n\
         check-out: {}\n\
         jitter:    up to {}s\n\
         target:    {}\n\
         host:      {}\n",
        if config.enabled { "enabled" } else { "disabled" },
        config.check_in,
        config.check_out,
        config.max_jitter_secs,
        config.target_app,
        config.host_app,
    )
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
