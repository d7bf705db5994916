//! Project-stage audit trail row.

use semillero_core::types::{DbId, StatusId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Append-only record of a project-stage status transition. The team
/// reference is optional: rejection paths destroy the team before the
/// record is written, and the FK nulls it if a team is removed later.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectHistory {
    pub id: DbId,
    pub project_id: DbId,
    pub team_id: Option<DbId>,
    pub status_id: StatusId,
    pub user_code: String,
    pub observation: String,
    pub recorded_at: Timestamp,
}

/// DTO for appending a project history record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectHistory {
    pub project_id: DbId,
    pub team_id: Option<DbId>,
    pub status_id: StatusId,
    pub user_code: String,
    pub observation: String,
}
