//! High-level tracker API for the progress and achievement engine.
//!
//! This module provides the main [`Tracker`] interface for interacting with
//! the Trellis progress tracking system. The tracker coordinates between the
//! application layers and the database, implementing the business rules for
//! plans, progress records, and achievements.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Tracker`] instances with configuration
//! - [`plan_ops`]: Plan store operations (register, retrieve)
//! - [`progress_ops`]: Progress record lifecycle and queries
//! - [`engine_ops`]: Milestone completion, percentage refresh, badges, likes
//!
//! # Usage
//!
//! ```rust
//! use trellis_core::{TrackerBuilder, params::CreateProgress};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create with default database path
//! let tracker = TrackerBuilder::new().build().await?;
//!
//! // Or specify a custom database path
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/custom/path/trellis.db"))
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod builder;
pub mod engine_ops;
pub mod plan_ops;
pub mod progress_ops;


pub use builder::TrackerBuilder;

/// Main tracker interface for plans, progress records, and achievements.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
}

impl Tracker {
    /// Creates a new tracker with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
