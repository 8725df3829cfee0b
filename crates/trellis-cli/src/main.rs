//! Trellis CLI Application
//!
//! Command-line interface for the Trellis progress and achievement tracker.

mod args;
mod cli;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, ListProgressArgs};
use log::info;
use trellis_core::TrackerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    info!("Trellis started");

    let cli = Cli::new(tracker);
    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Progress { command }) => cli.handle_progress_command(command).await,
        Some(Badges(args)) => cli.handle_badges_command(args).await,
        None => {
            cli.list_progress(ListProgressArgs {
                user: None,
                plan: None,
            })
            .await
        }
    }
}
