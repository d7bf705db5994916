//! Repository for the `team_members` table.

use semillero_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::team_member::{CreateTeamMember, TeamMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, user_code, is_leader, created_at";

/// Provides CRUD operations for team memberships.
pub struct TeamMemberRepo;

impl TeamMemberRepo {
    /// Insert a new membership, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateTeamMember,
    ) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members (team_id, user_code, is_leader)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(input.team_id)
            .bind(&input.user_code)
            .bind(input.is_leader)
            .fetch_one(db)
            .await
    }

    /// List the members of one team, leader first.
    pub async fn list_by_team(
        db: impl PgExecutor<'_>,
        team_id: DbId,
    ) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_members
             WHERE team_id = $1
             ORDER BY is_leader DESC, id"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .fetch_all(db)
            .await
    }

    /// List the members of a set of teams.
    pub async fn list_by_team_ids(
        db: impl PgExecutor<'_>,
        team_ids: &[DbId],
    ) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_members
             WHERE team_id = ANY($1)
             ORDER BY team_id, is_leader DESC, id"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_ids)
            .fetch_all(db)
            .await
    }

    /// Find a user's membership in a team, if any.
    pub async fn find(
        db: impl PgExecutor<'_>,
        team_id: DbId,
        user_code: &str,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_members
             WHERE team_id = $1 AND user_code = $2"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .bind(user_code)
            .fetch_optional(db)
            .await
    }

    /// Find a user's leader membership in a team, if any.
    pub async fn find_leader(
        db: impl PgExecutor<'_>,
        team_id: DbId,
        user_code: &str,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_members
             WHERE team_id = $1 AND user_code = $2 AND is_leader"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .bind(user_code)
            .fetch_optional(db)
            .await
    }

    /// Delete every membership of a set of teams. Returns the number of
    /// rows removed.
    pub async fn delete_by_team_ids(
        db: impl PgExecutor<'_>,
        team_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE team_id = ANY($1)")
            .bind(team_ids)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
