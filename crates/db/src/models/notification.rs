//! In-app notification entity model and DTOs.

use semillero_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table: one user's in-app inbox entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_code: String,
    pub project_id: Option<DbId>,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for creating an in-app notification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub user_code: String,
    pub project_id: Option<DbId>,
    pub title: String,
    pub body: String,
}
