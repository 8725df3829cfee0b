//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure using clap's derive API, following
//! the parameter wrapper pattern: each command has a CLI argument struct with
//! clap derives that converts into the framework-free parameter types from
//! `trellis_core::params` via `From`.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! This keeps clap concerns (flags, help text, value delimiters) in the CLI
//! layer while the core parameter types stay interface-agnostic.

use anyhow::Result;
use clap::{Args, Subcommand};
use jiff::Timestamp;
use trellis_core::{
    display::{Badges, CompletionResult, CreateResult, DeleteResult, ProgressRecords},
    params::{AwardBadge, CompleteMilestone, CreatePlan, CreateProgress, Id, UserId, UserPlanQuery},
    Tracker,
};

// ============================================================================
// Plan commands
// ============================================================================

/// Register a new plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    /// Kind of plan
    #[arg(short, long, default_value = "planting", help = "Kind of plan: 'planting' or 'learning'")]
    pub kind: String,
    /// Optional description providing more context about the plan
    #[arg(short, long)]
    pub description: Option<String>,
    /// ID of the user who owns the plan
    #[arg(short, long)]
    pub owner: String,
    /// Tags as a comma-separated list
    #[arg(short, long, value_delimiter = ',', help = "Tags as comma-separated list")]
    pub tags: Vec<String>,
    /// Milestone titles in plan order, comma-separated
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Milestone titles in plan order, comma-separated"
    )]
    pub milestones: Vec<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            kind: val.kind,
            title: val.title,
            description: val.description,
            owner_id: val.owner,
            tags: val.tags,
            milestones: val.milestones,
        }
    }
}

/// Show details of a specific plan
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    #[arg(help = "Unique identifier of the plan to show details for")]
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Register a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
}

// ============================================================================
// Progress commands
// ============================================================================

/// Start tracking a plan for a user
#[derive(Args)]
pub struct StartProgressArgs {
    /// ID of the user starting the plan
    pub user_id: String,
    /// ID of the plan to track
    pub plan_id: u64,
    /// Explicit start time (RFC 3339); defaults to now
    #[arg(long, help = "Explicit start time as an RFC 3339 timestamp")]
    pub started_at: Option<Timestamp>,
}

impl From<StartProgressArgs> for CreateProgress {
    fn from(val: StartProgressArgs) -> Self {
        CreateProgress {
            user_id: val.user_id,
            plan_id: val.plan_id,
            started_at: val.started_at,
        }
    }
}

/// List progress records, optionally filtered by user and/or plan
#[derive(Args)]
pub struct ListProgressArgs {
    /// Only records belonging to this user
    #[arg(short, long)]
    pub user: Option<String>,
    /// Only records tracking this plan
    #[arg(short, long)]
    pub plan: Option<u64>,
}

/// Show a single progress record
#[derive(Args)]
pub struct ShowProgressArgs {
    /// ID of the progress record to display
    pub id: u64,
}

impl From<ShowProgressArgs> for Id {
    fn from(val: ShowProgressArgs) -> Self {
        Id { id: val.id }
    }
}

/// List a user's records by most recent activity
#[derive(Args)]
pub struct RecentProgressArgs {
    /// ID of the user
    pub user_id: String,
}

impl From<RecentProgressArgs> for UserId {
    fn from(val: RecentProgressArgs) -> Self {
        UserId {
            user_id: val.user_id,
        }
    }
}

/// Record a milestone completion
#[derive(Args)]
pub struct CompleteMilestoneArgs {
    /// ID of the progress record
    pub progress_id: u64,
    /// ID of the milestone being completed
    pub milestone_id: u64,
    /// Explicit completion time (RFC 3339); defaults to now
    #[arg(long, help = "Explicit completion time as an RFC 3339 timestamp")]
    pub completed_at: Option<Timestamp>,
    /// Optional free-text note
    #[arg(short, long)]
    pub note: Option<String>,
    /// Media references (URLs) as a comma-separated list
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Media references (URLs) as comma-separated list"
    )]
    pub media: Vec<String>,
}

impl From<CompleteMilestoneArgs> for CompleteMilestone {
    fn from(val: CompleteMilestoneArgs) -> Self {
        CompleteMilestone {
            progress_id: val.progress_id,
            milestone_id: val.milestone_id,
            completed_at: val.completed_at,
            note: val.note,
            media_refs: val.media,
        }
    }
}

/// Grant a badge directly
#[derive(Args)]
pub struct AwardBadgeArgs {
    /// ID of the progress record
    pub progress_id: u64,
    /// Badge name to grant
    pub badge: String,
}

impl From<AwardBadgeArgs> for AwardBadge {
    fn from(val: AwardBadgeArgs) -> Self {
        AwardBadge {
            progress_id: val.progress_id,
            badge: val.badge,
        }
    }
}

/// Operate on a record by its ID
#[derive(Args)]
pub struct ProgressIdArgs {
    /// ID of the progress record
    pub id: u64,
}

impl From<ProgressIdArgs> for Id {
    fn from(val: ProgressIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Start tracking a plan for a user
    #[command(alias = "s")]
    Start(StartProgressArgs),
    /// List progress records
    #[command(aliases = ["l", "ls"])]
    List(ListProgressArgs),
    /// Show a single progress record
    Show(ShowProgressArgs),
    /// List a user's records by most recent activity
    #[command(alias = "r")]
    Recent(RecentProgressArgs),
    /// Record a milestone completion
    #[command(alias = "c")]
    Complete(CompleteMilestoneArgs),
    /// Recompute the percentage and re-run achievement rules
    Refresh(ProgressIdArgs),
    /// Recompute the percentage without rule evaluation
    Update(ProgressIdArgs),
    /// Grant a badge directly
    #[command(alias = "a")]
    Award(AwardBadgeArgs),
    /// Like a progress record
    Like(ProgressIdArgs),
    /// Delete a progress record permanently
    #[command(aliases = ["d", "rm"])]
    Delete(ProgressIdArgs),
}

/// Show the badges on a user's profile
#[derive(Args)]
pub struct UserBadgesArgs {
    /// ID of the user
    pub user_id: String,
}

impl From<UserBadgesArgs> for UserId {
    fn from(val: UserBadgesArgs) -> Self {
        UserId {
            user_id: val.user_id,
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Command handler dispatching parsed arguments to the tracker.
pub struct Cli {
    tracker: Tracker,
}

impl Cli {
    /// Create a new handler around a tracker instance.
    pub fn new(tracker: Tracker) -> Self {
        Self { tracker }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.tracker.create_plan(&args.into()).await?;
                println!("{}", CreateResult::new(plan));
            }
            PlanCommands::Show(args) => {
                let params: Id = args.into();
                match self.tracker.get_plan(&params).await? {
                    Some(plan) => println!("{plan}"),
                    None => println!("Plan with ID {} not found.", params.id),
                }
            }
        }
        Ok(())
    }

    pub async fn handle_progress_command(&self, command: ProgressCommands) -> Result<()> {
        match command {
            ProgressCommands::Start(args) => {
                let record = self.tracker.create_progress(&args.into()).await?;
                println!("{}", CreateResult::new(record));
            }
            ProgressCommands::List(args) => {
                self.list_progress(args).await?;
            }
            ProgressCommands::Show(args) => {
                let params: Id = args.into();
                match self.tracker.get_progress(&params).await? {
                    Some(record) => println!("{record}"),
                    None => println!("Progress record with ID {} not found.", params.id),
                }
            }
            ProgressCommands::Recent(args) => {
                let records = self.tracker.recent_progress_by_user(&args.into()).await?;
                println!("# Recent Progress");
                println!();
                print!("{}", ProgressRecords(records));
            }
            ProgressCommands::Complete(args) => {
                let update = self.tracker.complete_milestone(&args.into()).await?;
                println!("{}", CompletionResult(update));
            }
            ProgressCommands::Refresh(args) => {
                let update = self.tracker.refresh_percentage(&args.into()).await?;
                println!("{}", CompletionResult(update));
            }
            ProgressCommands::Update(args) => {
                let record = self.tracker.update_progress(&args.into()).await?;
                println!("{record}");
            }
            ProgressCommands::Award(args) => {
                let record = self.tracker.award_badge(&args.into()).await?;
                println!("{record}");
            }
            ProgressCommands::Like(args) => {
                let record = self.tracker.like_progress(&args.into()).await?;
                println!("Progress {} now has {} likes.", record.id, record.likes);
            }
            ProgressCommands::Delete(args) => {
                let params: Id = args.into();
                self.tracker.delete_progress(&params).await?;
                println!("{}", DeleteResult::new("progress record", params.id));
            }
        }
        Ok(())
    }

    pub async fn handle_badges_command(&self, args: UserBadgesArgs) -> Result<()> {
        let params: UserId = args.into();
        let badges = self.tracker.user_badges(&params).await?;
        println!("# Badges for {}", params.user_id);
        println!();
        print!("{}", Badges(badges));
        Ok(())
    }

    /// List all records, or narrow by user and/or plan.
    pub async fn list_progress(&self, args: ListProgressArgs) -> Result<()> {
        let records = match (args.user, args.plan) {
            (Some(user_id), Some(plan_id)) => {
                let record = self
                    .tracker
                    .progress_by_user_and_plan(&UserPlanQuery { user_id, plan_id })
                    .await?;
                record.into_iter().collect()
            }
            (Some(user_id), None) => self.tracker.progress_by_user(&UserId { user_id }).await?,
            (None, Some(plan_id)) => self.tracker.progress_by_plan(&Id { id: plan_id }).await?,
            (None, None) => self.tracker.list_progress().await?,
        };

        println!("# Progress Records");
        println!();
        print!("{}", ProgressRecords(records));
        Ok(())
    }
}
