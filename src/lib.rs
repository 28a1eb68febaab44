// ==========================================
// Install Orders - core library
// ==========================================
// Order assignment & status engine for home-installation work
// orders: company/installer/transporter assignment, transport date
// rules, one-person-company detection and status normalization.
// Routing, auth, photo storage and notification delivery are
// external collaborators.
// ==========================================

// Domain layer - entities and type vocabularies
pub mod domain;

// Repository layer - data access
pub mod repository;

// Engine layer - business rules
pub mod engine;

// Database infrastructure (connection init / PRAGMA / schema)
pub mod db;

// Logging
pub mod logging;

// Configuration
pub mod config;

// ==========================================
// Core re-exports
// ==========================================

pub use domain::types::{
    Capability, InstallationStatus, OperatorKind, Role, ServiceFamily, TransportStatus,
};

pub use domain::{Company, Order, Person};

pub use engine::{
    AssignCompanyCmd, AssignInstallerCmd, AssignTransporterCmd, AssignmentEngine, CreateOrderCmd,
    EngineError, EngineRepositories, EngineResult, FinancialFlagsCmd, NoOpEventPublisher,
    OptionalEventPublisher, OrderEvent, OrderEventPublisher, SoleOperatorResolver,
    UpdateStatusCmd,
};

pub use repository::{
    CompanyRepository, OrderRepository, PersonRepository, RepositoryError, RepositoryResult,
};

pub use config::AppConfig;

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Install Orders";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
