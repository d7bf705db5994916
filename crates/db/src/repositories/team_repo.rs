//! Repository for the `teams` table.

use semillero_core::types::{DbId, GroupAffiliation};
use sqlx::PgExecutor;

use crate::models::team::{CreateTeam, Team};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, label, subject_code, group_letter, period, year, is_active, created_at";

/// Provides CRUD operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a new active team, returning the created row.
    pub async fn create(db: impl PgExecutor<'_>, input: &CreateTeam) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (label, subject_code, group_letter, period, year, is_active)
             VALUES ($1, $2, $3, $4, $5, TRUE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(&input.label)
            .bind(&input.affiliation.subject_code)
            .bind(&input.affiliation.group_letter)
            .bind(&input.affiliation.period)
            .bind(input.affiliation.year)
            .fetch_one(db)
            .await
    }

    /// Find a team by its internal ID.
    pub async fn find_by_id(db: impl PgExecutor<'_>, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// List every team tied to a group, oldest first. All four affiliation
    /// fields must match. Includes inactive teams; callers filter.
    pub async fn find_by_affiliation(
        db: impl PgExecutor<'_>,
        affiliation: &GroupAffiliation,
    ) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teams
             WHERE subject_code = $1 AND group_letter = $2 AND period = $3 AND year = $4
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(&affiliation.subject_code)
            .bind(&affiliation.group_letter)
            .bind(&affiliation.period)
            .bind(affiliation.year)
            .fetch_all(db)
            .await
    }

    /// Soft-deactivate a team, preserving its memberships. Returns `true`
    /// if a row changed.
    pub async fn deactivate(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE teams SET is_active = FALSE WHERE id = $1 AND is_active")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a set of teams. Memberships must be deleted
    /// first. Returns the number of rows removed.
    pub async fn delete_by_ids(db: impl PgExecutor<'_>, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ANY($1)")
            .bind(ids)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
