// ==========================================
// Install Orders - engine layer
// ==========================================
// Business rules. Engines never touch SQL; every rejection carries
// a human-readable reason.
// ==========================================

pub mod assignment;
pub mod capability;
pub mod dates;
pub mod error;
pub mod events;
pub mod repositories;
pub mod sole_operator;
pub mod status;

pub use assignment::{
    AssignCompanyCmd, AssignInstallerCmd, AssignTransporterCmd, AssignmentEngine, CreateOrderCmd,
    FinancialFlagsCmd, UpdateStatusCmd,
};
pub use capability::{acts_as_installer, has_capability, required_capability, service_family};
pub use dates::{default_transport_date, validate_transport_date, DateCheck};
pub use error::{EngineError, EngineResult};
pub use events::{NoOpEventPublisher, OptionalEventPublisher, OrderEvent, OrderEventPublisher};
pub use repositories::EngineRepositories;
pub use sole_operator::SoleOperatorResolver;
pub use status::{normalize_installation_status, normalize_transport_status};
