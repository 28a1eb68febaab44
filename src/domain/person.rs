// ==========================================
// Install Orders - Person (user) entity
// ==========================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub person_id: Uuid,
    pub name: String,
    pub role: Role,
    /// Company membership; null for store staff and admins.
    pub company_id: Option<Uuid>,
    /// Ordered free-text capability labels, e.g. "Montaż drzwi",
    /// "Montaż podłogi", "Transport".
    pub services: Vec<String>,
}

impl Person {
    pub fn is_installer(&self) -> bool {
        self.role == Role::Installer
    }

    pub fn belongs_to(&self, company_id: Uuid) -> bool {
        self.company_id == Some(company_id)
    }
}
