//! Repository for the `ideas` table.

use semillero_core::types::{DbId, GroupAffiliation, StatusId};
use sqlx::PgExecutor;

use crate::models::idea::{CreateIdea, Idea};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, problem_statement, justification, general_objective, \
    specific_objectives, subject_code, group_letter, period, year, user_code, status_id, \
    created_at, updated_at";

/// Provides CRUD and workflow-transition operations for ideas.
///
/// Ideas are never deleted; every lifecycle change is a status update.
pub struct IdeaRepo;

impl IdeaRepo {
    /// Insert a new idea, returning the created row.
    pub async fn create(db: impl PgExecutor<'_>, input: &CreateIdea) -> Result<Idea, sqlx::Error> {
        let query = format!(
            "INSERT INTO ideas
                (title, problem_statement, justification, general_objective, specific_objectives,
                 subject_code, group_letter, period, year, user_code, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(&input.title)
            .bind(&input.problem_statement)
            .bind(&input.justification)
            .bind(&input.general_objective)
            .bind(&input.specific_objectives)
            .bind(&input.affiliation.subject_code)
            .bind(&input.affiliation.group_letter)
            .bind(&input.affiliation.period)
            .bind(input.affiliation.year)
            .bind(&input.user_code)
            .bind(input.status_id)
            .fetch_one(db)
            .await
    }

    /// Find an idea by its internal ID.
    pub async fn find_by_id(db: impl PgExecutor<'_>, id: DbId) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ideas WHERE id = $1");
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Move an idea to a new status, leaving affiliation and owner intact.
    pub async fn set_status(
        db: impl PgExecutor<'_>,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "UPDATE ideas SET status_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(db)
            .await
    }

    /// Return an idea to the proposal bank: new status, owner and
    /// affiliation cleared in one statement.
    pub async fn release(
        db: impl PgExecutor<'_>,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "UPDATE ideas SET
                status_id = $2,
                user_code = NULL,
                subject_code = NULL,
                group_letter = NULL,
                period = NULL,
                year = NULL,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(db)
            .await
    }

    /// Hand an idea to a new owner in a new group: status, owner, and the
    /// affiliation quartet all set together. Used by adoption and
    /// continuation.
    pub async fn reassign(
        db: impl PgExecutor<'_>,
        id: DbId,
        status_id: StatusId,
        user_code: &str,
        affiliation: &GroupAffiliation,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "UPDATE ideas SET
                status_id = $2,
                user_code = $3,
                subject_code = $4,
                group_letter = $5,
                period = $6,
                year = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .bind(status_id)
            .bind(user_code)
            .bind(&affiliation.subject_code)
            .bind(&affiliation.group_letter)
            .bind(&affiliation.period)
            .bind(affiliation.year)
            .fetch_optional(db)
            .await
    }

    /// Clear the affiliation quartet without touching status or owner.
    pub async fn clear_affiliation(
        db: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "UPDATE ideas SET
                subject_code = NULL,
                group_letter = NULL,
                period = NULL,
                year = NULL,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// The proposal bank: ideas in the given bank status that have at
    /// least one project in the given graded status.
    pub async fn find_free_proposals(
        db: impl PgExecutor<'_>,
        bank_status_id: StatusId,
        graded_status_id: StatusId,
    ) -> Result<Vec<Idea>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ideas i
             WHERE i.status_id = $1
               AND EXISTS (
                   SELECT 1 FROM projects p
                   WHERE p.idea_id = i.id AND p.status_id = $2
               )
             ORDER BY i.updated_at DESC"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(bank_status_id)
            .bind(graded_status_id)
            .fetch_all(db)
            .await
    }
}
