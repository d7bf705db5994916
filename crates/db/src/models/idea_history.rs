//! Idea-stage audit trail row.

use semillero_core::types::{DbId, StatusId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Append-only record of an idea-stage status transition. Never mutated
/// or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IdeaHistory {
    pub id: DbId,
    pub idea_id: DbId,
    pub status_id: StatusId,
    pub user_code: String,
    pub observation: String,
    pub recorded_at: Timestamp,
}

/// DTO for appending an idea history record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIdeaHistory {
    pub idea_id: DbId,
    pub status_id: StatusId,
    pub user_code: String,
    pub observation: String,
}
