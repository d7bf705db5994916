//! Repository for the `activities` table.

use semillero_core::types::{DbId, GroupAffiliation};
use sqlx::PgExecutor;

use crate::models::activity::{Activity, CreateActivity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, subject_code, group_letter, period, year, scope_type, \
    starts_at, ends_at, created_at";

/// Provides operations on activity milestones.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateActivity,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (name, subject_code, group_letter, period, year, scope_type, starts_at, ends_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(&input.name)
            .bind(&input.affiliation.subject_code)
            .bind(&input.affiliation.group_letter)
            .bind(&input.affiliation.period)
            .bind(input.affiliation.year)
            .bind(&input.scope_type)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .fetch_one(db)
            .await
    }

    /// Find an activity by its internal ID.
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// List the activities defined for a group, newest first. All four
    /// affiliation fields must match.
    pub async fn find_by_affiliation(
        db: impl PgExecutor<'_>,
        affiliation: &GroupAffiliation,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities
             WHERE subject_code = $1 AND group_letter = $2 AND period = $3 AND year = $4
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(&affiliation.subject_code)
            .bind(&affiliation.group_letter)
            .bind(&affiliation.period)
            .bind(affiliation.year)
            .fetch_all(db)
            .await
    }
}
