// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! punch - scheduled clock-action CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod daemon_process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{daemon, schedule, status, trigger};

#[derive(Parser)]
#[command(
    name = "punch",
    version,
    about = "punch - scheduled clock actions with randomized timing"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show daemon status and the next scheduled actions
    Status,
    /// Enable scheduled clock actions
    Enable,
    /// Disable scheduled clock actions
    Disable,
    /// Update the schedule
    Set(schedule::SetArgs),
    /// Show the current schedule
    Config,
    /// Run a clock action now (applies the usual randomized delay)
    Test,
    /// Daemon management
    Daemon(daemon::DaemonArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output (common when
/// thiserror variants use `#[error("... {0}")]` with `#[from]`).
/// Otherwise we render the full chain so context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // No subcommand provided — print help and exit 0
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Status => status::status().await,
        Commands::Enable => schedule::set_enabled(true).await,
        Commands::Disable => schedule::set_enabled(false).await,
        Commands::Set(args) => schedule::set(args).await,
        Commands::Config => schedule::show().await,
        Commands::Test => trigger::test().await,
        Commands::Daemon(args) => daemon::daemon(args).await,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
