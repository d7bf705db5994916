//! Repository for the `users` table.

use sqlx::PgExecutor;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "code, full_name, email, created_at";

/// Provides operations on users, keyed by institutional code.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(db: impl PgExecutor<'_>, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (code, full_name, email)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.code)
            .bind(&input.full_name)
            .bind(&input.email)
            .fetch_one(db)
            .await
    }

    /// Find a user by institutional code.
    pub async fn find_by_code(
        db: impl PgExecutor<'_>,
        code: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE code = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(code)
            .fetch_optional(db)
            .await
    }

    /// Fetch all users for a set of codes. Used for notification fan-out.
    pub async fn find_by_codes(
        db: impl PgExecutor<'_>,
        codes: &[String],
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE code = ANY($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(codes)
            .fetch_all(db)
            .await
    }
}
