// ==========================================
// Install Orders - repository error types
// ==========================================
// Repositories hold no business logic; their errors describe
// storage concerns only.
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Concurrency =====
    #[error("optimistic lock conflict: {entity} id={id}, expected revision {expected}, found {actual}")]
    OptimisticLockFailure {
        entity: &'static str,
        id: String,
        expected: i64,
        actual: i64,
    },

    #[error("database lock acquisition failed: {0}")]
    LockError(String),

    // ===== Database =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    // ===== Data quality =====
    #[error("stored value invalid (field={field}): {message}")]
    FieldValueError { field: &'static str, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
