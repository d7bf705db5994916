//! User entity model and DTOs.

use semillero_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table, keyed by institutional code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub code: String,
    pub full_name: String,
    pub email: String,
}
