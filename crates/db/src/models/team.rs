//! Team entity model and DTOs.

use semillero_core::types::{DbId, GroupAffiliation, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `teams` table: the students executing one project
/// attempt within one course-group context.
///
/// A team is valid only while `is_active` is true. Release-to-pool
/// deactivates the row; rejection deletes it outright.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub label: String,
    pub subject_code: String,
    pub group_letter: String,
    pub period: String,
    pub year: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Team {
    pub fn affiliation(&self) -> GroupAffiliation {
        GroupAffiliation::new(
            self.subject_code.clone(),
            self.group_letter.clone(),
            self.period.clone(),
            self.year,
        )
    }
}

/// DTO for creating a new team.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeam {
    pub label: String,
    pub affiliation: GroupAffiliation,
}
