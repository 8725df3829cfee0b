//! Plan store operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{Plan, PlanKind},
    params::{CreatePlan, Id},
};

impl Tracker {
    /// Registers a new plan with its milestones and tags.
    ///
    /// Milestone titles are stored in the given order; each milestone
    /// receives a durable ID that outlives later plan edits.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let kind = params
            .kind
            .parse::<PlanKind>()
            .map_err(|reason| TrackerError::InvalidInput {
                field: "kind".to_string(),
                reason,
            })?;

        let db_path = self.db_path.clone();
        let title = params.title.clone();
        let description = params.description.clone();
        let owner_id = params.owner_id.clone();
        let tags = params.tags.clone();
        let milestones = params.milestones.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_plan(
                kind,
                &title,
                description.as_deref(),
                &owner_id,
                &tags,
                &milestones,
            )
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_plan(plan_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
