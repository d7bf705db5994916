//! Project entity model and DTOs.

use semillero_core::types::{DbId, StatusId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table. At most one project exists per idea
/// (`uq_projects_idea_id`), and the owning idea never changes once set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub idea_id: DbId,
    pub research_line: String,
    pub technologies: Option<String>,
    pub keywords: Option<String>,
    pub scope_type: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub idea_id: DbId,
    pub research_line: String,
    pub technologies: Option<String>,
    pub keywords: Option<String>,
    pub scope_type: String,
    pub status_id: StatusId,
}
