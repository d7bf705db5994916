//! Repository for the `projects` table.

use semillero_core::types::{DbId, StatusId};
use sqlx::PgExecutor;

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, idea_id, research_line, technologies, keywords, scope_type, \
    status_id, created_at, updated_at";

/// Provides CRUD and workflow-transition operations for projects.
///
/// Projects are never deleted; `uq_projects_idea_id` keeps the idea
/// relationship one-to-one.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (idea_id, research_line, technologies, keywords, scope_type, status_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.idea_id)
            .bind(&input.research_line)
            .bind(&input.technologies)
            .bind(&input.keywords)
            .bind(&input.scope_type)
            .bind(input.status_id)
            .fetch_one(db)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Find the project created for an idea, if any.
    pub async fn find_by_idea(
        db: impl PgExecutor<'_>,
        idea_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE idea_id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(idea_id)
            .fetch_optional(db)
            .await
    }

    /// Move a project to a new status.
    pub async fn set_status(
        db: impl PgExecutor<'_>,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(db)
            .await
    }
}
