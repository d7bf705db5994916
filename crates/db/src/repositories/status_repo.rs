//! Repository for the `statuses` lookup table.

use sqlx::PgExecutor;

use crate::models::status::Status;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name";

/// Read-only access to the status vocabulary.
pub struct StatusRepo;

impl StatusRepo {
    /// List every status, in id order.
    pub async fn list_all(db: impl PgExecutor<'_>) -> Result<Vec<Status>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM statuses ORDER BY id");
        sqlx::query_as::<_, Status>(&query).fetch_all(db).await
    }

    /// Find a status by its exact name.
    pub async fn find_by_name(
        db: impl PgExecutor<'_>,
        name: &str,
    ) -> Result<Option<Status>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM statuses WHERE name = $1");
        sqlx::query_as::<_, Status>(&query)
            .bind(name)
            .fetch_optional(db)
            .await
    }
}
