use semillero_core::error::CoreError;

/// Error type for workflow operations.
///
/// Wraps [`CoreError`] for domain failures and `sqlx::Error` for store
/// failures. Any error raised inside an operation's transaction causes a
/// full rollback before it is surfaced.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A domain-level error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for workflow operation results.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Classify a sqlx error raised by an insert.
///
/// Unique constraint violations (constraint name starting with `uq_`) map
/// to [`CoreError::Conflict`]; everything else stays a database error.
pub fn classify_insert_error(err: sqlx::Error) -> WorkflowError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            if let Some(constraint) = db_err.constraint() {
                if constraint.starts_with("uq_") {
                    return WorkflowError::Core(CoreError::Conflict(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    )));
                }
            }
        }
    }
    WorkflowError::Database(err)
}
