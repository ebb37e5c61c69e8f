//! Error types for the ledger service.

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The store is unreachable or rejected a statement.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Entity not found")]
    NotFound,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller-supplied input violates a precondition. Never persists
    /// a partial write.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Opaque surface for storage failures; not retried by the core.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Storage(e) => AppError::Internal(e),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
        }
    }
}
