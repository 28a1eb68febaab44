// ==========================================
// Install Orders - engine error taxonomy
// ==========================================
// Typed variants so callers can distinguish "retry with different
// input" from "never retry" without string matching.
// ==========================================

use thiserror::Error;

use crate::repository::error::RepositoryError;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Referenced order/person/company does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Malformed or missing command fields; raised before any
    /// persistence is attempted.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Capability mismatch, cross-company mismatch or a violated
    /// date constraint, with a human-readable reason.
    #[error("business rule violation: {0}")]
    BusinessRuleViolation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EngineError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
