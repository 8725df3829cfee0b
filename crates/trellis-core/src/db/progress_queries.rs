//! Progress record queries and the milestone completion engine.
//!
//! Each mutating operation loads the record, applies the change, recomputes
//! the completion percentage from the plan's current milestone list, runs
//! achievement rule evaluation where the operation calls for it, and persists
//! the result inside a single transaction. The stored percentage is never
//! trusted from input; it is always rederived here.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    achievements,
    error::{DatabaseResultExt, Result, TrackerError},
    models::{CompletedMilestone, ProgressRecord},
};

use super::plan_queries::resolve_plan_ref;

const INSERT_PROGRESS_SQL: &str = "INSERT INTO progress (user_id, plan_id, percent_complete, started_at, last_updated_at, likes) VALUES (?1, ?2, 0, ?3, ?4, 0)";
const SELECT_PROGRESS_SQL: &str = "SELECT id, user_id, plan_id, percent_complete, started_at, last_updated_at, likes FROM progress WHERE id = ?1";
const SELECT_ALL_PROGRESS_SQL: &str = "SELECT id, user_id, plan_id, percent_complete, started_at, last_updated_at, likes FROM progress ORDER BY id";
const SELECT_PROGRESS_BY_USER_SQL: &str = "SELECT id, user_id, plan_id, percent_complete, started_at, last_updated_at, likes FROM progress WHERE user_id = ?1 ORDER BY id";
const SELECT_PROGRESS_BY_PLAN_SQL: &str = "SELECT id, user_id, plan_id, percent_complete, started_at, last_updated_at, likes FROM progress WHERE plan_id = ?1 ORDER BY id";
const SELECT_PROGRESS_BY_USER_AND_PLAN_SQL: &str = "SELECT id, user_id, plan_id, percent_complete, started_at, last_updated_at, likes FROM progress WHERE user_id = ?1 AND plan_id = ?2";
const SELECT_RECENT_BY_USER_SQL: &str = "SELECT id, user_id, plan_id, percent_complete, started_at, last_updated_at, likes FROM progress WHERE user_id = ?1 ORDER BY last_updated_at DESC";
const UPDATE_PROGRESS_STATE_SQL: &str =
    "UPDATE progress SET percent_complete = ?1, last_updated_at = ?2 WHERE id = ?3";
const INCREMENT_LIKES_SQL: &str = "UPDATE progress SET likes = likes + 1 WHERE id = ?1";
const DELETE_PROGRESS_SQL: &str = "DELETE FROM progress WHERE id = ?1";
const INSERT_COMPLETED_SQL: &str = "INSERT INTO completed_milestones (progress_id, milestone_id, completed_at, note, media_refs) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_COMPLETED_SQL: &str = "SELECT milestone_id, completed_at, note, media_refs FROM completed_milestones WHERE progress_id = ?1 ORDER BY completed_at, milestone_id";
const INSERT_PROGRESS_BADGE_SQL: &str =
    "INSERT INTO progress_badges (progress_id, badge) VALUES (?1, ?2)";
const SELECT_PROGRESS_BADGES_SQL: &str =
    "SELECT badge FROM progress_badges WHERE progress_id = ?1 ORDER BY rowid";

/// Outcome of an operation that may trigger achievement rule evaluation:
/// the updated record plus the badges newly granted during this call.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// The record after the mutation
    pub record: ProgressRecord,
    /// Badges granted by this call, in rule evaluation order
    pub new_badges: Vec<String>,
}

fn parse_timestamp(index: usize, value: String) -> rusqlite::Result<Timestamp> {
    value
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn map_progress_row(row: &rusqlite::Row) -> rusqlite::Result<ProgressRecord> {
    Ok(ProgressRecord {
        id: row.get::<_, i64>(0)? as u64,
        user_id: row.get(1)?,
        plan_id: row.get::<_, i64>(2)? as u64,
        percent_complete: row.get(3)?,
        started_at: parse_timestamp(4, row.get::<_, String>(4)?)?,
        last_updated_at: parse_timestamp(5, row.get::<_, String>(5)?)?,
        completed_milestones: Vec::new(),
        badges: Vec::new(),
        likes: row.get::<_, i64>(6)? as u32,
    })
}

fn load_completed(conn: &Connection, progress_id: u64) -> Result<Vec<CompletedMilestone>> {
    let mut stmt = conn
        .prepare(SELECT_COMPLETED_SQL)
        .db_context("Failed to prepare completed-milestone query")?;

    let completed = stmt
        .query_map(params![progress_id as i64], |row| {
            let media_refs: Option<String> = row.get(3)?;
            Ok(CompletedMilestone {
                milestone_id: row.get::<_, i64>(0)? as u64,
                completed_at: parse_timestamp(1, row.get::<_, String>(1)?)?,
                note: row.get(2)?,
                media_refs: media_refs
                    .map(|joined| {
                        joined
                            .split(',')
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
        })
        .db_context("Failed to query completed milestones")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch completed milestones")?;

    Ok(completed)
}

fn load_badges(conn: &Connection, progress_id: u64) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(SELECT_PROGRESS_BADGES_SQL)
        .db_context("Failed to prepare badge query")?;

    let badges = stmt
        .query_map(params![progress_id as i64], |row| row.get::<_, String>(0))
        .db_context("Failed to query badges")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch badges")?;

    Ok(badges)
}

fn hydrate(conn: &Connection, mut record: ProgressRecord) -> Result<ProgressRecord> {
    record.completed_milestones = load_completed(conn, record.id)?;
    record.badges = load_badges(conn, record.id)?;
    Ok(record)
}

/// Load a fully hydrated record. Takes a plain connection so it works both
/// standalone and inside a transaction.
fn get_progress_with(conn: &Connection, id: u64) -> Result<Option<ProgressRecord>> {
    let record = conn
        .query_row(SELECT_PROGRESS_SQL, params![id as i64], map_progress_row)
        .optional()
        .db_context("Failed to query progress record")?;

    match record {
        Some(record) => Ok(Some(hydrate(conn, record)?)),
        None => Ok(None),
    }
}

fn require_progress(conn: &Connection, id: u64) -> Result<ProgressRecord> {
    get_progress_with(conn, id)?.ok_or(TrackerError::ProgressNotFound { id })
}

fn collect_records(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<ProgressRecord>> {
    let mut stmt = conn.prepare(sql).db_context("Failed to prepare query")?;

    let records = stmt
        .query_map(args, map_progress_row)
        .db_context("Failed to query progress records")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch progress records")?;

    records
        .into_iter()
        .map(|record| hydrate(conn, record))
        .collect()
}

/// Grant a badge to both sides: the record's badge list and the user's
/// profile. Runs inside the caller's transaction, so a failure on either
/// side rolls back both.
fn grant_badge(conn: &Connection, record: &ProgressRecord, badge: &str) -> Result<()> {
    debug!(
        "granting badge {badge} to progress {} (user {})",
        record.id, record.user_id
    );
    conn.execute(
        INSERT_PROGRESS_BADGE_SQL,
        params![record.id as i64, badge],
    )
    .db_context("Failed to insert progress badge")?;
    super::badge_queries::grant_badge_to_user(conn, &record.user_id, badge)?;
    Ok(())
}

impl super::Database {
    /// Starts a progress record for a user against a plan.
    ///
    /// Fails with `PlanNotFound` when the plan does not exist and rejects a
    /// second record for the same `(user, plan)` pair.
    pub fn create_progress(
        &mut self,
        user_id: &str,
        plan_id: u64,
        started_at: Option<Timestamp>,
    ) -> Result<ProgressRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if resolve_plan_ref(&tx, plan_id)?.is_none() {
            return Err(TrackerError::PlanNotFound { id: plan_id });
        }

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM progress WHERE user_id = ?1 AND plan_id = ?2",
                params![user_id, plan_id as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to check for existing progress record")?;
        if existing.is_some() {
            return Err(TrackerError::InvalidInput {
                field: "plan_id".to_string(),
                reason: format!("user '{user_id}' already tracks plan {plan_id}"),
            });
        }

        let started_at = started_at.unwrap_or_else(Timestamp::now);
        let now = Timestamp::now();

        tx.execute(
            INSERT_PROGRESS_SQL,
            params![
                user_id,
                plan_id as i64,
                super::timestamp_to_sql(&started_at),
                super::timestamp_to_sql(&now)
            ],
        )
        .db_context("Failed to insert progress record")?;

        let id = tx.last_insert_rowid() as u64;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(ProgressRecord {
            id,
            user_id: user_id.into(),
            plan_id,
            percent_complete: 0.0,
            started_at,
            last_updated_at: now,
            completed_milestones: Vec::new(),
            badges: Vec::new(),
            likes: 0,
        })
    }

    /// Retrieves a progress record by its ID with completed milestones and
    /// badges loaded.
    pub fn get_progress(&self, id: u64) -> Result<Option<ProgressRecord>> {
        get_progress_with(&self.connection, id)
    }

    /// Lists all progress records.
    pub fn list_progress(&self) -> Result<Vec<ProgressRecord>> {
        collect_records(&self.connection, SELECT_ALL_PROGRESS_SQL, &[])
    }

    /// Lists all progress records belonging to a user.
    pub fn progress_by_user(&self, user_id: &str) -> Result<Vec<ProgressRecord>> {
        collect_records(&self.connection, SELECT_PROGRESS_BY_USER_SQL, &[&user_id])
    }

    /// Lists all progress records tracking a plan.
    pub fn progress_by_plan(&self, plan_id: u64) -> Result<Vec<ProgressRecord>> {
        let plan_id = plan_id as i64;
        collect_records(&self.connection, SELECT_PROGRESS_BY_PLAN_SQL, &[&plan_id])
    }

    /// Looks up the single progress record a user has on a plan.
    pub fn progress_by_user_and_plan(
        &self,
        user_id: &str,
        plan_id: u64,
    ) -> Result<Option<ProgressRecord>> {
        let record = self
            .connection
            .query_row(
                SELECT_PROGRESS_BY_USER_AND_PLAN_SQL,
                params![user_id, plan_id as i64],
                map_progress_row,
            )
            .optional()
            .db_context("Failed to query progress record")?;

        match record {
            Some(record) => Ok(Some(hydrate(&self.connection, record)?)),
            None => Ok(None),
        }
    }

    /// Lists a user's progress records ordered by most recent activity.
    pub fn recent_progress_by_user(&self, user_id: &str) -> Result<Vec<ProgressRecord>> {
        collect_records(&self.connection, SELECT_RECENT_BY_USER_SQL, &[&user_id])
    }

    /// Touches a progress record: recomputes the percentage against the
    /// plan's current milestones and updates the activity timestamp.
    ///
    /// Does not run achievement rules; use
    /// [`refresh_percentage`](Self::refresh_percentage) for that.
    pub fn update_progress(&mut self, id: u64) -> Result<ProgressRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut record = require_progress(&tx, id)?;
        let plan = resolve_plan_ref(&tx, record.plan_id)?
            .ok_or(TrackerError::PlanNotFound { id: record.plan_id })?;

        record.percent_complete = record.percentage_against(&plan.milestone_ids);
        record.last_updated_at = Timestamp::now();

        tx.execute(
            UPDATE_PROGRESS_STATE_SQL,
            params![
                record.percent_complete,
                super::timestamp_to_sql(&record.last_updated_at),
                id as i64
            ],
        )
        .db_context("Failed to update progress record")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(record)
    }

    /// Deletes a progress record along with its completed milestones and
    /// badges. The referenced plan is untouched.
    pub fn delete_progress(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let affected = tx
            .execute(DELETE_PROGRESS_SQL, params![id as i64])
            .db_context("Failed to delete progress record")?;
        if affected == 0 {
            return Err(TrackerError::ProgressNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Records a milestone completion on a progress record.
    ///
    /// Idempotent: when the milestone ID is already in the completed set the
    /// whole call is a no-op, touching neither timestamps nor badges. A
    /// fresh completion recomputes the percentage and runs achievement rule
    /// evaluation, granting any newly qualifying badges to the record and
    /// the user profile atomically.
    pub fn complete_milestone(
        &mut self,
        progress_id: u64,
        milestone_id: u64,
        completed_at: Option<Timestamp>,
        note: Option<&str>,
        media_refs: &[String],
    ) -> Result<ProgressUpdate> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut record = require_progress(&tx, progress_id)?;
        if record.has_completed(milestone_id) {
            return Ok(ProgressUpdate {
                record,
                new_badges: Vec::new(),
            });
        }

        let plan = resolve_plan_ref(&tx, record.plan_id)?
            .ok_or(TrackerError::PlanNotFound { id: record.plan_id })?;

        let completed_at = completed_at.unwrap_or_else(Timestamp::now);
        let joined_refs = if media_refs.is_empty() {
            None
        } else {
            Some(media_refs.join(","))
        };

        tx.execute(
            INSERT_COMPLETED_SQL,
            params![
                progress_id as i64,
                milestone_id as i64,
                super::timestamp_to_sql(&completed_at),
                note,
                joined_refs
            ],
        )
        .db_context("Failed to insert completed milestone")?;

        record.completed_milestones.push(CompletedMilestone {
            milestone_id,
            completed_at,
            note: note.map(String::from),
            media_refs: media_refs.to_vec(),
        });

        record.percent_complete = record.percentage_against(&plan.milestone_ids);

        let new_badges = achievements::qualifying_badges(
            plan.kind,
            record.percent_complete,
            &plan.tags,
            &record.badges,
        );
        for badge in &new_badges {
            grant_badge(&tx, &record, badge)?;
        }
        record.badges.extend(new_badges.iter().cloned());

        record.last_updated_at = Timestamp::now();
        tx.execute(
            UPDATE_PROGRESS_STATE_SQL,
            params![
                record.percent_complete,
                super::timestamp_to_sql(&record.last_updated_at),
                progress_id as i64
            ],
        )
        .db_context("Failed to update progress record")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(ProgressUpdate { record, new_badges })
    }

    /// Recomputes the stored percentage from the plan's current milestone
    /// list and runs achievement rule evaluation on the result.
    ///
    /// This repairs records that drifted after milestones were removed from
    /// their plan.
    pub fn refresh_percentage(&mut self, id: u64) -> Result<ProgressUpdate> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut record = require_progress(&tx, id)?;
        let plan = resolve_plan_ref(&tx, record.plan_id)?
            .ok_or(TrackerError::PlanNotFound { id: record.plan_id })?;

        record.percent_complete = record.percentage_against(&plan.milestone_ids);

        let new_badges = achievements::qualifying_badges(
            plan.kind,
            record.percent_complete,
            &plan.tags,
            &record.badges,
        );
        for badge in &new_badges {
            grant_badge(&tx, &record, badge)?;
        }
        record.badges.extend(new_badges.iter().cloned());

        record.last_updated_at = Timestamp::now();
        tx.execute(
            UPDATE_PROGRESS_STATE_SQL,
            params![
                record.percent_complete,
                super::timestamp_to_sql(&record.last_updated_at),
                id as i64
            ],
        )
        .db_context("Failed to update progress record")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(ProgressUpdate { record, new_badges })
    }

    /// Grants a badge directly, bypassing rule evaluation.
    ///
    /// A badge the record already holds makes the whole call a no-op: no
    /// profile grant and no timestamp touch.
    pub fn award_badge(&mut self, progress_id: u64, badge: &str) -> Result<ProgressRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut record = require_progress(&tx, progress_id)?;
        if record.has_badge(badge) {
            return Ok(record);
        }

        grant_badge(&tx, &record, badge)?;
        record.badges.push(badge.to_string());

        record.last_updated_at = Timestamp::now();
        tx.execute(
            UPDATE_PROGRESS_STATE_SQL,
            params![
                record.percent_complete,
                super::timestamp_to_sql(&record.last_updated_at),
                progress_id as i64
            ],
        )
        .db_context("Failed to update progress record")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(record)
    }

    /// Increments the like counter on a progress record.
    ///
    /// Likes are social, not progress; the activity timestamp is left alone
    /// so recency ordering reflects actual work.
    pub fn like_progress(&mut self, id: u64) -> Result<ProgressRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let affected = tx
            .execute(INCREMENT_LIKES_SQL, params![id as i64])
            .db_context("Failed to increment likes")?;
        if affected == 0 {
            return Err(TrackerError::ProgressNotFound { id });
        }

        let record = require_progress(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(record)
    }
}
