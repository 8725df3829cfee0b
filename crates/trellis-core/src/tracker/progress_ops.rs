//! Progress record lifecycle and query operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::ProgressRecord,
    params::{CreateProgress, Id, UserId, UserPlanQuery},
};

impl Tracker {
    /// Starts tracking a plan for a user.
    ///
    /// The start time defaults to now; at most one record can exist per
    /// `(user, plan)` pair.
    pub async fn create_progress(&self, params: &CreateProgress) -> Result<ProgressRecord> {
        let db_path = self.db_path.clone();
        let user_id = params.user_id.clone();
        let plan_id = params.plan_id;
        let started_at = params.started_at;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_progress(&user_id, plan_id, started_at)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a progress record by its ID.
    pub async fn get_progress(&self, params: &Id) -> Result<Option<ProgressRecord>> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_progress(id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists all progress records.
    pub async fn list_progress(&self) -> Result<Vec<ProgressRecord>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_progress()
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists a user's progress records.
    pub async fn progress_by_user(&self, params: &UserId) -> Result<Vec<ProgressRecord>> {
        let db_path = self.db_path.clone();
        let user_id = params.user_id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.progress_by_user(&user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists the progress records tracking a plan.
    pub async fn progress_by_plan(&self, params: &Id) -> Result<Vec<ProgressRecord>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.progress_by_plan(plan_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Looks up the single record a user has on a plan.
    pub async fn progress_by_user_and_plan(
        &self,
        params: &UserPlanQuery,
    ) -> Result<Option<ProgressRecord>> {
        let db_path = self.db_path.clone();
        let user_id = params.user_id.clone();
        let plan_id = params.plan_id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.progress_by_user_and_plan(&user_id, plan_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists a user's progress records, most recently updated first.
    pub async fn recent_progress_by_user(&self, params: &UserId) -> Result<Vec<ProgressRecord>> {
        let db_path = self.db_path.clone();
        let user_id = params.user_id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.recent_progress_by_user(&user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Touches a progress record, recomputing its percentage against the
    /// plan's current milestones without running achievement rules.
    pub async fn update_progress(&self, params: &Id) -> Result<ProgressRecord> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_progress(id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Permanently deletes a progress record and its completion history.
    /// The referenced plan is untouched. This operation cannot be undone.
    pub async fn delete_progress(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_progress(id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
