//! Course group entity model and DTOs.

use semillero_core::types::{GroupAffiliation, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `groups` table, keyed by the composite natural key
/// (subject code, group letter, period, year).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    pub subject_code: String,
    pub group_letter: String,
    pub period: String,
    pub year: i32,
    pub subject_name: String,
    pub professor_code: Option<String>,
    pub created_at: Timestamp,
}

impl Group {
    pub fn affiliation(&self) -> GroupAffiliation {
        GroupAffiliation::new(
            self.subject_code.clone(),
            self.group_letter.clone(),
            self.period.clone(),
            self.year,
        )
    }
}

/// DTO for creating a new group.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroup {
    pub subject_code: String,
    pub group_letter: String,
    pub period: String,
    pub year: i32,
    pub subject_name: String,
    pub professor_code: Option<String>,
}
