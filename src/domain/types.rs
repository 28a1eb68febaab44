// ==========================================
// Install Orders - domain type vocabularies
// ==========================================
// Closed enums for order lifecycle status, person roles
// and service capabilities. Legacy string spellings are
// handled at the ingress boundary (engine::status), never here.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// InstallationStatus
// ==========================================
// Serialized form: canonical Polish tokens (database/API vocabulary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallationStatus {
    #[serde(rename = "nowe")]
    New,
    #[serde(rename = "zaplanowane")]
    Scheduled,
    #[serde(rename = "w trakcie")]
    InProgress,
    #[serde(rename = "wykonane")]
    Completed,
    #[serde(rename = "reklamacja")]
    Complaint,
}

impl InstallationStatus {
    /// Canonical token, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallationStatus::New => "nowe",
            InstallationStatus::Scheduled => "zaplanowane",
            InstallationStatus::InProgress => "w trakcie",
            InstallationStatus::Completed => "wykonane",
            InstallationStatus::Complaint => "reklamacja",
        }
    }

    /// Strict parse of the canonical token. Legacy spellings are the
    /// normalizer's job; the database only ever holds these tokens.
    pub fn parse_canonical(raw: &str) -> Option<InstallationStatus> {
        match raw {
            "nowe" => Some(InstallationStatus::New),
            "zaplanowane" => Some(InstallationStatus::Scheduled),
            "w trakcie" => Some(InstallationStatus::InProgress),
            "wykonane" => Some(InstallationStatus::Completed),
            "reklamacja" => Some(InstallationStatus::Complaint),
            _ => None,
        }
    }
}

impl fmt::Display for InstallationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// TransportStatus
// ==========================================
// Only meaningful on orders created with transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportStatus {
    #[serde(rename = "gotowe")]
    Ready,
    #[serde(rename = "zaplanowany")]
    Scheduled,
    #[serde(rename = "dostarczone")]
    Delivered,
}

impl TransportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportStatus::Ready => "gotowe",
            TransportStatus::Scheduled => "zaplanowany",
            TransportStatus::Delivered => "dostarczone",
        }
    }

    pub fn parse_canonical(raw: &str) -> Option<TransportStatus> {
        match raw {
            "gotowe" => Some(TransportStatus::Ready),
            "zaplanowany" => Some(TransportStatus::Scheduled),
            "dostarczone" => Some(TransportStatus::Delivered),
            _ => None,
        }
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Capability
// ==========================================
// The work a person may perform. Labels are the free-text
// values carried in person.services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    InstallDoors,
    InstallFloors,
    Transport,
}

impl Capability {
    /// Label as it appears in a person's service list.
    pub fn label(&self) -> &'static str {
        match self {
            Capability::InstallDoors => "Montaż drzwi",
            Capability::InstallFloors => "Montaż podłogi",
            Capability::Transport => "Transport",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// ServiceFamily
// ==========================================
// Coarse classification derived from the order's free-text
// service type; drives the transport date rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceFamily {
    Door,
    Floor,
    Other,
}

impl fmt::Display for ServiceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFamily::Door => write!(f, "DOOR"),
            ServiceFamily::Floor => write!(f, "FLOOR"),
            ServiceFamily::Other => write!(f, "OTHER"),
        }
    }
}

// ==========================================
// Role
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Worker,
    Company,
    Installer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Worker => "worker",
            Role::Company => "company",
            Role::Installer => "installer",
        }
    }

    /// Parse the database token. Unknown tokens are rejected,
    /// the role vocabulary is closed.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "worker" => Some(Role::Worker),
            "company" => Some(Role::Company),
            "installer" => Some(Role::Installer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// OperatorKind
// ==========================================
// Explicit tag on Company marking one-person companies, so the
// resolver does not have to re-scan installer rows on every call.
// Standard companies may still be scanned as a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorKind {
    Standard,
    SoleOperator(Uuid),
}

impl OperatorKind {
    pub fn is_sole_operator(&self) -> bool {
        matches!(self, OperatorKind::SoleOperator(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installation_status_tokens_round_trip_via_serde() {
        let json = serde_json::to_string(&InstallationStatus::InProgress).unwrap();
        assert_eq!(json, "\"w trakcie\"");
        let back: InstallationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, InstallationStatus::InProgress);
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("Installer"), Some(Role::Installer));
        assert_eq!(Role::parse(" ADMIN "), Some(Role::Admin));
        assert_eq!(Role::parse("customer"), None);
    }

    #[test]
    fn operator_kind_tag() {
        assert!(!OperatorKind::Standard.is_sole_operator());
        assert!(OperatorKind::SoleOperator(Uuid::new_v4()).is_sole_operator());
    }
}
