//! Plan store queries: registration and reference resolution.
//!
//! The progress engine treats plans as read-only reference data. Plans enter
//! the store through [`super::Database::create_plan`] (milestones authored
//! inline, each assigned a durable ID) and are consumed either fully via
//! [`super::Database::get_plan`] or as a lightweight [`PlanRef`] inside
//! progress transactions.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Milestone, Plan, PlanKind},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (kind, title, description, owner_id, is_public, likes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, 0, ?5, ?6)";
const INSERT_MILESTONE_SQL: &str =
    "INSERT INTO milestones (plan_id, title, description, order_index) VALUES (?1, ?2, ?3, ?4)";
const INSERT_PLAN_TAG_SQL: &str =
    "INSERT OR IGNORE INTO plan_tags (plan_id, tag) VALUES (?1, ?2)";
const SELECT_PLAN_SQL: &str = "SELECT id, kind, title, description, owner_id, is_public, likes, created_at, updated_at FROM plans WHERE id = ?1";
const SELECT_MILESTONES_SQL: &str = "SELECT id, plan_id, title, description, order_index FROM milestones WHERE plan_id = ?1 ORDER BY order_index";
const SELECT_MILESTONE_IDS_SQL: &str =
    "SELECT id FROM milestones WHERE plan_id = ?1 ORDER BY order_index";
const SELECT_PLAN_TAGS_SQL: &str = "SELECT tag FROM plan_tags WHERE plan_id = ?1 ORDER BY tag";
const SELECT_PLAN_KIND_SQL: &str = "SELECT kind FROM plans WHERE id = ?1";

/// Resolved plan reference: everything the engine needs from a plan.
///
/// Milestone IDs are in plan order; the tag set is what the achievement
/// rules match the specialty tag against.
#[derive(Debug, Clone)]
pub(crate) struct PlanRef {
    pub kind: PlanKind,
    pub milestone_ids: Vec<u64>,
    pub tags: Vec<String>,
}

/// Resolve a plan to its milestone IDs, tags, and kind.
///
/// Takes a plain connection so it can run inside a caller's transaction.
/// Returns `None` when the plan does not exist; callers decide whether that
/// is a `PlanNotFound` failure.
pub(crate) fn resolve_plan_ref(conn: &Connection, plan_id: u64) -> Result<Option<PlanRef>> {
    let kind_str: Option<String> = conn
        .query_row(SELECT_PLAN_KIND_SQL, params![plan_id as i64], |row| {
            row.get(0)
        })
        .optional()
        .db_context("Failed to query plan kind")?;

    let Some(kind_str) = kind_str else {
        return Ok(None);
    };

    let kind = kind_str
        .parse::<PlanKind>()
        .map_err(|reason| TrackerError::InvalidInput {
            field: "kind".to_string(),
            reason,
        })?;

    let mut stmt = conn
        .prepare(SELECT_MILESTONE_IDS_SQL)
        .db_context("Failed to prepare milestone query")?;
    let milestone_ids = stmt
        .query_map(params![plan_id as i64], |row| {
            Ok(row.get::<_, i64>(0)? as u64)
        })
        .db_context("Failed to query milestone IDs")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch milestone IDs")?;

    let mut stmt = conn
        .prepare(SELECT_PLAN_TAGS_SQL)
        .db_context("Failed to prepare tag query")?;
    let tags = stmt
        .query_map(params![plan_id as i64], |row| row.get::<_, String>(0))
        .db_context("Failed to query plan tags")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch plan tags")?;

    Ok(Some(PlanRef {
        kind,
        milestone_ids,
        tags,
    }))
}

fn load_milestones(conn: &Connection, plan_id: u64) -> Result<Vec<Milestone>> {
    let mut stmt = conn
        .prepare(SELECT_MILESTONES_SQL)
        .db_context("Failed to prepare milestone query")?;

    let milestones = stmt
        .query_map(params![plan_id as i64], |row| {
            Ok(Milestone {
                id: row.get::<_, i64>(0)? as u64,
                plan_id: row.get::<_, i64>(1)? as u64,
                title: row.get(2)?,
                description: row.get(3)?,
                order: row.get::<_, i64>(4)? as u32,
            })
        })
        .db_context("Failed to query milestones")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch milestones")?;

    Ok(milestones)
}

impl super::Database {
    /// Registers a new plan with its milestones and tags.
    ///
    /// Milestone titles are stored in the given order, each receiving a
    /// durable ID that is never reused.
    pub fn create_plan(
        &mut self,
        kind: PlanKind,
        title: &str,
        description: Option<&str>,
        owner_id: &str,
        tags: &[String],
        milestones: &[String],
    ) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = super::timestamp_to_sql(&now);

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                kind.as_str(),
                title,
                description,
                owner_id,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert plan")?;

        let plan_id = tx.last_insert_rowid() as u64;

        let mut created_milestones = Vec::with_capacity(milestones.len());
        for (order, milestone_title) in milestones.iter().enumerate() {
            tx.execute(
                INSERT_MILESTONE_SQL,
                params![
                    plan_id as i64,
                    milestone_title,
                    None::<String>,
                    order as i64
                ],
            )
            .db_context("Failed to insert milestone")?;

            created_milestones.push(Milestone {
                id: tx.last_insert_rowid() as u64,
                plan_id,
                title: milestone_title.clone(),
                description: None,
                order: order as u32,
            });
        }

        for tag in tags {
            tx.execute(INSERT_PLAN_TAG_SQL, params![plan_id as i64, tag])
                .db_context("Failed to insert plan tag")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan {
            id: plan_id,
            kind,
            title: title.into(),
            description: description.map(String::from),
            owner_id: owner_id.into(),
            public: true,
            tags: tags.to_vec(),
            likes: 0,
            created_at: now,
            updated_at: now,
            milestones: created_milestones,
        })
    }

    /// Retrieves a plan by its ID with milestones and tags eagerly loaded.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_SQL)
            .db_context("Failed to prepare query")?;

        let mut plan = stmt
            .query_row(params![id as i64], |row| {
                let kind_str: String = row.get(1)?;
                let kind = kind_str.parse::<PlanKind>().map_err(|_| {
                    rusqlite::Error::FromSqlConversionFailure(
                        1,
                        Type::Text,
                        format!("Invalid plan kind: {kind_str}").into(),
                    )
                })?;

                Ok(Plan {
                    id: row.get::<_, i64>(0)? as u64,
                    kind,
                    title: row.get(2)?,
                    description: row.get(3)?,
                    owner_id: row.get(4)?,
                    public: row.get::<_, i64>(5)? != 0,
                    tags: Vec::new(),
                    likes: row.get::<_, i64>(6)? as u32,
                    created_at: row.get::<_, String>(7)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
                    })?,
                    updated_at: row.get::<_, String>(8)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e))
                    })?,
                    milestones: Vec::new(),
                })
            })
            .optional()
            .db_context("Failed to query plan")?;

        if let Some(ref mut plan) = plan {
            plan.milestones = load_milestones(&self.connection, plan.id)?;

            let mut stmt = self
                .connection
                .prepare(SELECT_PLAN_TAGS_SQL)
                .db_context("Failed to prepare tag query")?;
            plan.tags = stmt
                .query_map(params![plan.id as i64], |row| row.get::<_, String>(0))
                .db_context("Failed to query plan tags")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch plan tags")?;
        }

        Ok(plan)
    }
}
