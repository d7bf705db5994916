//! Idea entity model and DTOs.

use semillero_core::types::{DbId, GroupAffiliation, StatusId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ideas` table.
///
/// The affiliation quartet and the owning user are nullable: an idea in the
/// proposal bank (status `LIBRE`) carries neither.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Idea {
    pub id: DbId,
    pub title: String,
    pub problem_statement: String,
    pub justification: String,
    pub general_objective: String,
    pub specific_objectives: String,
    pub subject_code: Option<String>,
    pub group_letter: Option<String>,
    pub period: Option<String>,
    pub year: Option<i32>,
    pub user_code: Option<String>,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Idea {
    /// The idea's group affiliation, present only when all four columns are.
    pub fn affiliation(&self) -> Option<GroupAffiliation> {
        GroupAffiliation::from_columns(
            self.subject_code.clone(),
            self.group_letter.clone(),
            self.period.clone(),
            self.year,
        )
    }
}

/// DTO for creating a new idea.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIdea {
    pub title: String,
    pub problem_statement: String,
    pub justification: String,
    pub general_objective: String,
    pub specific_objectives: String,
    pub affiliation: GroupAffiliation,
    pub user_code: String,
    pub status_id: StatusId,
}
