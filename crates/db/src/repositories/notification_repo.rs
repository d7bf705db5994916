//! Repository for the `notifications` table.

use semillero_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::notification::{CreateNotification, Notification};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_code, project_id, title, body, is_read, created_at";

/// Provides operations on in-app notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a new unread notification, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_code, project_id, title, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.user_code)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(db)
            .await
    }

    /// List a user's notifications, newest first.
    pub async fn list_for_user(
        db: impl PgExecutor<'_>,
        user_code: &str,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_code = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_code)
            .fetch_all(db)
            .await
    }

    /// Mark a notification as read. Returns `true` if a row changed.
    pub async fn mark_read(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
