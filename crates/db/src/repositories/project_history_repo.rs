//! Repository for the `project_history` table.

use semillero_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::project_history::{CreateProjectHistory, ProjectHistory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, team_id, status_id, user_code, observation, recorded_at";

/// Append-only access to the project-stage audit trail.
pub struct ProjectHistoryRepo;

impl ProjectHistoryRepo {
    /// Append a history record, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateProjectHistory,
    ) -> Result<ProjectHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_history (project_id, team_id, status_id, user_code, observation)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectHistory>(&query)
            .bind(input.project_id)
            .bind(input.team_id)
            .bind(input.status_id)
            .bind(&input.user_code)
            .bind(&input.observation)
            .fetch_one(db)
            .await
    }

    /// List a project's history, newest first.
    pub async fn list_by_project(
        db: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Vec<ProjectHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_history
             WHERE project_id = $1
             ORDER BY recorded_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProjectHistory>(&query)
            .bind(project_id)
            .fetch_all(db)
            .await
    }
}
