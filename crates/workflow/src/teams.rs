//! Team lifecycle side effects for workflow transitions.
//!
//! Rejection paths *destroy* teams and their memberships; release-to-pool
//! *deactivates* the team so history records can still join to it. The two
//! policies are deliberately distinct operations.

use semillero_core::types::{DbId, GroupAffiliation};
use sqlx::{PgConnection, PgExecutor};

use semillero_db::models::team::{CreateTeam, Team};
use semillero_db::models::team_member::{CreateTeamMember, TeamMember};
use semillero_db::repositories::{TeamMemberRepo, TeamRepo};

/// Creates and removes teams as a side effect of workflow transitions.
pub struct TeamLifecycle;

impl TeamLifecycle {
    /// Create an active team with its single leader membership, inside the
    /// caller's transaction.
    pub async fn create_team(
        conn: &mut PgConnection,
        affiliation: &GroupAffiliation,
        label: &str,
        leader_code: &str,
    ) -> Result<(Team, TeamMember), sqlx::Error> {
        let team = TeamRepo::create(
            &mut *conn,
            &CreateTeam {
                label: label.to_string(),
                affiliation: affiliation.clone(),
            },
        )
        .await?;

        let leader = TeamMemberRepo::create(
            &mut *conn,
            &CreateTeamMember {
                team_id: team.id,
                user_code: leader_code.to_string(),
                is_leader: true,
            },
        )
        .await?;

        Ok((team, leader))
    }

    /// Hard-delete a set of teams: memberships first, then the team rows.
    /// Used for rejection cleanup. A no-op on an empty set.
    pub async fn destroy_teams(conn: &mut PgConnection, team_ids: &[DbId]) -> Result<(), sqlx::Error> {
        if team_ids.is_empty() {
            return Ok(());
        }
        TeamMemberRepo::delete_by_team_ids(&mut *conn, team_ids).await?;
        TeamRepo::delete_by_ids(&mut *conn, team_ids).await?;
        Ok(())
    }

    /// Soft-deactivate a team, preserving memberships for audit linkage.
    pub async fn deactivate_team(db: impl PgExecutor<'_>, team_id: DbId) -> Result<bool, sqlx::Error> {
        TeamRepo::deactivate(db, team_id).await
    }

    /// Every team tied to a group affiliation, active or not.
    pub async fn find_by_affiliation(
        db: impl PgExecutor<'_>,
        affiliation: &GroupAffiliation,
    ) -> Result<Vec<Team>, sqlx::Error> {
        TeamRepo::find_by_affiliation(db, affiliation).await
    }

    /// The user's leader membership in the given team, if any.
    pub async fn find_leader(
        db: impl PgExecutor<'_>,
        team_id: DbId,
        user_code: &str,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        TeamMemberRepo::find_leader(db, team_id, user_code).await
    }
}
