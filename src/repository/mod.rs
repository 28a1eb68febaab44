// ==========================================
// Install Orders - repository layer
// ==========================================
// Data access only. Business rules live in the engine layer;
// repositories never decide, they load and store.
// ==========================================

pub mod company_repo;
pub mod error;
pub mod order_repo;
pub mod person_repo;

pub use company_repo::CompanyRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use order_repo::OrderRepository;
pub use person_repo::PersonRepository;

use uuid::Uuid;

/// Parse a stored uuid column.
pub(crate) fn parse_uuid(field: &'static str, raw: &str) -> RepositoryResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| RepositoryError::FieldValueError {
        field,
        message: e.to_string(),
    })
}

/// Parse an optional stored uuid column.
pub(crate) fn parse_uuid_opt(
    field: &'static str,
    raw: Option<&str>,
) -> RepositoryResult<Option<Uuid>> {
    raw.map(|r| parse_uuid(field, r)).transpose()
}

/// Parse a JSON-encoded string list column (services, photos).
pub(crate) fn parse_string_list(field: &'static str, raw: &str) -> RepositoryResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| RepositoryError::FieldValueError {
        field,
        message: e.to_string(),
    })
}

/// Encode a string list for storage.
pub(crate) fn encode_string_list(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}
