// ==========================================
// Install Orders - Company entity
// ==========================================
// Capabilities are not stored on the company; they live on the
// installer-role persons belonging to it. The operator_kind tag
// marks known one-person companies explicitly.
// ==========================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::OperatorKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub company_id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub operator_kind: OperatorKind,
}
