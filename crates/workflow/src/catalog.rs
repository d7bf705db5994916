//! Name-keyed status catalog.
//!
//! Statuses are rarely-changing reference data: the catalog reads the whole
//! `statuses` table once at startup and serves lookups from memory. Every
//! workflow operation resolves all the statuses it references *before*
//! opening its transaction, so a missing name aborts the operation with no
//! partial effect. Call [`StatusCatalog::refresh`] after editing the table.

use std::collections::HashMap;
use std::sync::RwLock;

use semillero_core::error::CoreError;
use semillero_db::models::status::Status;
use semillero_db::repositories::StatusRepo;
use semillero_db::DbPool;

/// In-memory view of the `statuses` lookup table, keyed by exact name.
pub struct StatusCatalog {
    by_name: RwLock<HashMap<String, Status>>,
}

impl StatusCatalog {
    /// Load the catalog from the database.
    pub async fn load(pool: &DbPool) -> Result<Self, sqlx::Error> {
        let statuses = StatusRepo::list_all(pool).await?;
        Ok(Self::from_statuses(statuses))
    }

    /// Build a catalog from an already-fetched status list.
    pub fn from_statuses(statuses: Vec<Status>) -> Self {
        let by_name = statuses.into_iter().map(|s| (s.name.clone(), s)).collect();
        Self {
            by_name: RwLock::new(by_name),
        }
    }

    /// Re-read the `statuses` table, replacing the cached view.
    pub async fn refresh(&self, pool: &DbPool) -> Result<(), sqlx::Error> {
        let statuses = StatusRepo::list_all(pool).await?;
        let mut guard = self.by_name.write().expect("status catalog lock poisoned");
        *guard = statuses.into_iter().map(|s| (s.name.clone(), s)).collect();
        Ok(())
    }

    /// Resolve a status by its exact name.
    pub fn resolve(&self, name: &str) -> Result<Status, CoreError> {
        let guard = self.by_name.read().expect("status catalog lock poisoned");
        guard
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::not_found_key("Status", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semillero_core::status::STATUS_APROBADO;

    fn catalog() -> StatusCatalog {
        StatusCatalog::from_statuses(vec![
            Status {
                id: 1,
                name: "LIBRE".to_string(),
            },
            Status {
                id: 4,
                name: STATUS_APROBADO.to_string(),
            },
        ])
    }

    #[test]
    fn resolve_finds_exact_name() {
        let status = catalog().resolve(STATUS_APROBADO).unwrap();
        assert_eq!(status.id, 4);
        assert_eq!(status.name, STATUS_APROBADO);
    }

    #[test]
    fn resolve_is_case_sensitive() {
        assert!(catalog().resolve("aprobado").is_err());
    }

    #[test]
    fn resolve_unknown_name_is_not_found() {
        let err = catalog().resolve("NO_SUCH_STATUS").unwrap_err();
        assert!(err.to_string().contains("NO_SUCH_STATUS"));
    }
}
