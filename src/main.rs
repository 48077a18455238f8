// src/main.rs

//! courtbot: automated court reservation for the CUG sports venue portal.
//!
//! One invocation performs one booking pass (login → availability → one
//! order per configured target). Run it from cron at the portal's order
//! opening time.

mod error;
mod models;
mod pipeline;
mod services;
mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::models::Config;

#[derive(Parser, Debug)]
#[command(name = "courtbot", version, about = "CUG sports venue booking bot")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a full booking pass for today
    Book,

    /// Fetch and print today's open areas
    Availability,

    /// Validate the configuration file without touching the network
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config).inspect_err(|e| {
        log::error!("Failed to load config from {}: {e}", cli.config.display());
    })?;
    config.validate()?;

    match cli.command {
        Command::Book => pipeline::run_booking(&config).await?,
        Command::Availability => pipeline::run_availability(&config).await?,
        Command::Validate => {
            log::info!(
                "Config OK: {} targets, portal {}",
                config.targets.len(),
                config.portal.index
            );
        }
    }

    Ok(())
}
