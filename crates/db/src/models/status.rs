//! Status lookup row.

use semillero_core::types::StatusId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `statuses` table. Statuses are seeded by migration and
/// resolved by exact name at runtime; they are never created through the
/// workflow API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Status {
    pub id: StatusId,
    pub name: String,
}
