use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{PlanCommands, ProgressCommands, UserBadgesArgs};

/// Main command-line interface for the Trellis progress tracking tool
///
/// Trellis tracks per-user progress through plans made of ordered milestones,
/// derives completion percentages, and awards achievement badges as
/// thresholds are crossed. It provides a command-line interface for
/// registering plans, recording milestone completions, and inspecting the
/// resulting progress and badges.
#[derive(Parser)]
#[command(version, about, name = "trellis")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/trellis/trellis.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Trellis CLI
///
/// The CLI is organized into three main command categories:
/// - `plan`: Operations on the plan store (register, show)
/// - `progress`: Progress record operations (start, complete, refresh, etc.)
/// - `badges`: Inspect the badges on a user's profile
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "pl")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage progress records
    #[command(alias = "pr")]
    Progress {
        #[command(subcommand)]
        command: ProgressCommands,
    },
    /// Show the badges on a user's profile
    #[command(alias = "b")]
    Badges(UserBadgesArgs),
}
