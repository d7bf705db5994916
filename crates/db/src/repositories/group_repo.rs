//! Repository for the `groups` table.

use semillero_core::types::GroupAffiliation;
use sqlx::PgExecutor;

use crate::models::group::{CreateGroup, Group};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "subject_code, group_letter, period, year, subject_name, professor_code, created_at";

/// Provides operations on course groups, always addressed by the full
/// composite key.
pub struct GroupRepo;

impl GroupRepo {
    /// Insert a new group, returning the created row.
    pub async fn create(db: impl PgExecutor<'_>, input: &CreateGroup) -> Result<Group, sqlx::Error> {
        let query = format!(
            "INSERT INTO groups (subject_code, group_letter, period, year, subject_name, professor_code)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(&input.subject_code)
            .bind(&input.group_letter)
            .bind(&input.period)
            .bind(input.year)
            .bind(&input.subject_name)
            .bind(&input.professor_code)
            .fetch_one(db)
            .await
    }

    /// Find a group by its composite key. All four fields must match.
    pub async fn find(
        db: impl PgExecutor<'_>,
        affiliation: &GroupAffiliation,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM groups
             WHERE subject_code = $1 AND group_letter = $2 AND period = $3 AND year = $4"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(&affiliation.subject_code)
            .bind(&affiliation.group_letter)
            .bind(&affiliation.period)
            .bind(affiliation.year)
            .fetch_optional(db)
            .await
    }
}
