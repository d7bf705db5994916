//! Append-only audit trail for workflow transitions.
//!
//! Every successful status-changing operation writes exactly one record
//! through this module, inside the operation's transaction.

use semillero_core::types::{DbId, StatusId};
use sqlx::PgExecutor;

use semillero_db::models::idea_history::{CreateIdeaHistory, IdeaHistory};
use semillero_db::models::project_history::{CreateProjectHistory, ProjectHistory};
use semillero_db::repositories::{IdeaHistoryRepo, ProjectHistoryRepo};

/// Records workflow transitions.
pub struct HistoryRecorder;

impl HistoryRecorder {
    /// Append an idea-stage record.
    pub async fn record_idea(
        db: impl PgExecutor<'_>,
        idea_id: DbId,
        status_id: StatusId,
        user_code: &str,
        observation: &str,
    ) -> Result<IdeaHistory, sqlx::Error> {
        IdeaHistoryRepo::create(
            db,
            &CreateIdeaHistory {
                idea_id,
                status_id,
                user_code: user_code.to_string(),
                observation: observation.to_string(),
            },
        )
        .await
    }

    /// Append a project-stage record. `team_id` is `None` when the
    /// transition destroyed the team before the record was written.
    pub async fn record_project(
        db: impl PgExecutor<'_>,
        project_id: DbId,
        team_id: Option<DbId>,
        status_id: StatusId,
        user_code: &str,
        observation: &str,
    ) -> Result<ProjectHistory, sqlx::Error> {
        ProjectHistoryRepo::create(
            db,
            &CreateProjectHistory {
                project_id,
                team_id,
                status_id,
                user_code: user_code.to_string(),
                observation: observation.to_string(),
            },
        )
        .await
    }

    /// Compose the stored observation from the action label and the
    /// caller-supplied text.
    pub fn compose(label: &str, observation: &str) -> String {
        let observation = observation.trim();
        if observation.is_empty() {
            label.to_string()
        } else {
            format!("{label}: {observation}")
        }
    }
}
