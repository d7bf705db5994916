//! Team membership entity model and DTOs.

use semillero_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `team_members` table linking a user to a team.
/// Exactly one member per team carries `is_leader = true`, enforced at
/// team creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub id: DbId,
    pub team_id: DbId,
    pub user_code: String,
    pub is_leader: bool,
    pub created_at: Timestamp,
}

/// DTO for adding a member to a team.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamMember {
    pub team_id: DbId,
    pub user_code: String,
    pub is_leader: bool,
}
