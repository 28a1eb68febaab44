// ==========================================
// Install Orders - Order aggregate
// ==========================================
// The aggregate root of the engine. Mutated only through
// AssignmentEngine operations plus the financial-flag path.
// Carries an optimistic-lock revision; see OrderRepository.
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{InstallationStatus, ServiceFamily, TransportStatus};
use crate::engine::capability::service_family;

// ==========================================
// Order
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Uuid,
    /// Caller-visible number, assigned once at creation, never reused.
    pub order_no: String,
    pub store_id: String,

    // ===== Client contact =====
    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_address: String,

    // ===== Work definition =====
    /// Free text, interpreted by substring into door/floor families.
    pub service_type: String,
    /// Fixed at creation; transport fields below are meaningless without it.
    pub with_transport: bool,

    // ===== Lifecycle =====
    pub installation_status: InstallationStatus,
    /// Populated only when with_transport.
    pub transport_status: Option<TransportStatus>,

    // ===== Assignments (denormalized display names, snapshots) =====
    pub company_id: Uuid,
    pub company_name: String,
    pub installer_id: Option<Uuid>,
    pub installer_name: Option<String>,
    pub transporter_id: Option<Uuid>,
    pub transporter_name: Option<String>,

    // ===== Scheduling =====
    pub installation_date: Option<NaiveDate>,
    pub transport_date: Option<NaiveDate>,

    // ===== Complaints =====
    pub complaint_notes: Option<String>,
    /// Opaque photo references, append-only until explicit deletion.
    pub complaint_photos: Vec<String>,

    // ===== Audit trail =====
    /// Newline-joined comment history, append-only.
    pub notes: Option<String>,

    // ===== Financial flags (separate, less-restrictive mutator) =====
    pub invoice_issued: bool,
    pub will_be_settled: bool,

    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Optimistic lock counter, bumped on every persisted update.
    pub revision: i64,
}

impl Order {
    /// Service family derived from the free-text service type.
    pub fn service_family(&self) -> ServiceFamily {
        service_family(&self.service_type)
    }

    pub fn is_new(&self) -> bool {
        self.installation_status == InstallationStatus::New
    }

    /// Append a comment to the notes audit trail, oldest first.
    /// Never overwrites existing history.
    pub fn append_note(&mut self, comment: &str) {
        let comment = comment.trim();
        if comment.is_empty() {
            return;
        }
        self.notes = Some(match self.notes.take() {
            Some(existing) if !existing.is_empty() => format!("{}\n{}", existing, comment),
            _ => comment.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        let now = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Order {
            order_id: Uuid::new_v4(),
            order_no: "ZL-2024-0001".to_string(),
            store_id: "S01".to_string(),
            client_name: "Jan Kowalski".to_string(),
            client_phone: None,
            client_address: "ul. Prosta 1, Warszawa".to_string(),
            service_type: "Montaż drzwi".to_string(),
            with_transport: false,
            installation_status: InstallationStatus::New,
            transport_status: None,
            company_id: Uuid::new_v4(),
            company_name: "MontEx".to_string(),
            installer_id: None,
            installer_name: None,
            transporter_id: None,
            transporter_name: None,
            installation_date: None,
            transport_date: None,
            complaint_notes: None,
            complaint_photos: Vec::new(),
            notes: None,
            invoice_issued: false,
            will_be_settled: false,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    #[test]
    fn append_note_preserves_history_oldest_first() {
        let mut order = sample_order();
        order.append_note("pierwsza uwaga");
        order.append_note("druga uwaga");
        assert_eq!(order.notes.as_deref(), Some("pierwsza uwaga\ndruga uwaga"));
    }

    #[test]
    fn append_note_ignores_blank_comment() {
        let mut order = sample_order();
        order.append_note("   ");
        assert!(order.notes.is_none());
    }

    #[test]
    fn service_family_from_service_type() {
        let mut order = sample_order();
        assert_eq!(order.service_family(), ServiceFamily::Door);
        order.service_type = "Montaż podłogi".to_string();
        assert_eq!(order.service_family(), ServiceFamily::Floor);
    }
}
