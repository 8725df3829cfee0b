//! Database operations and SQLite management for plans and progress records.
//!
//! This module provides low-level database operations for the Trellis
//! progress tracking system. It handles SQLite connections, schema
//! management, and specialized query interfaces for the plan store, the
//! progress record store, and the user-badge sink.
//!
//! Every mutating operation runs its full read-modify-write sequence inside
//! one transaction, so a milestone completion, its percentage recompute, its
//! badge grants, and the profile propagation commit or roll back together.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod badge_queries;
pub mod migrations;
pub mod plan_queries;
pub mod progress_queries;

/// Format a timestamp for storage.
///
/// Fixed nanosecond precision keeps all stored values the same width, so
/// lexicographic `ORDER BY` on the TEXT column matches chronological order.
pub(crate) fn timestamp_to_sql(ts: &Timestamp) -> String {
    format!("{ts:.9}")
}

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
