//! Activity milestone entity model and DTOs.

use semillero_core::types::{DbId, GroupAffiliation, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activities` table: a milestone defined for one course
/// group. Project creation requires an activity for the idea's affiliation
/// whose `scope_type` is set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub name: String,
    pub subject_code: String,
    pub group_letter: String,
    pub period: String,
    pub year: i32,
    pub scope_type: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new activity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub name: String,
    pub affiliation: GroupAffiliation,
    pub scope_type: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}
