//! Repository for the `idea_history` table.

use semillero_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::idea_history::{CreateIdeaHistory, IdeaHistory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, idea_id, status_id, user_code, observation, recorded_at";

/// Append-only access to the idea-stage audit trail.
pub struct IdeaHistoryRepo;

impl IdeaHistoryRepo {
    /// Append a history record, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateIdeaHistory,
    ) -> Result<IdeaHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO idea_history (idea_id, status_id, user_code, observation)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IdeaHistory>(&query)
            .bind(input.idea_id)
            .bind(input.status_id)
            .bind(&input.user_code)
            .bind(&input.observation)
            .fetch_one(db)
            .await
    }

    /// List an idea's history, newest first.
    pub async fn list_by_idea(
        db: impl PgExecutor<'_>,
        idea_id: DbId,
    ) -> Result<Vec<IdeaHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM idea_history
             WHERE idea_id = $1
             ORDER BY recorded_at DESC, id DESC"
        );
        sqlx::query_as::<_, IdeaHistory>(&query)
            .bind(idea_id)
            .fetch_all(db)
            .await
    }
}
