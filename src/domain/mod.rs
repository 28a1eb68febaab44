// ==========================================
// Install Orders - domain layer
// ==========================================
// Entities and closed type vocabularies. No persistence,
// no business orchestration here.
// ==========================================

pub mod company;
pub mod order;
pub mod person;
pub mod types;

pub use company::Company;
pub use order::Order;
pub use person::Person;
pub use types::{
    Capability, InstallationStatus, OperatorKind, Role, ServiceFamily, TransportStatus,
};
