// ==========================================
// Install Orders - domain event publishing
// ==========================================
// The engine emits events; a separate consumer performs the actual
// notification delivery. Delivery is best-effort and never affects
// the outcome of an assignment operation.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::types::{InstallationStatus, TransportStatus};

// ==========================================
// Event types
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderCreated {
        order_id: Uuid,
        order_no: String,
    },
    CompanyAssigned {
        order_id: Uuid,
        company_id: Uuid,
    },
    InstallerAssigned {
        order_id: Uuid,
        installer_id: Uuid,
        installation_date: NaiveDate,
    },
    TransporterAssigned {
        order_id: Uuid,
        transporter_id: Uuid,
        transport_date: Option<NaiveDate>,
    },
    StatusChanged {
        order_id: Uuid,
        installation_status: InstallationStatus,
        transport_status: Option<TransportStatus>,
    },
    OrderDeleted {
        order_id: Uuid,
    },
}

impl OrderEvent {
    /// Short identifier for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated { .. } => "OrderCreated",
            OrderEvent::CompanyAssigned { .. } => "CompanyAssigned",
            OrderEvent::InstallerAssigned { .. } => "InstallerAssigned",
            OrderEvent::TransporterAssigned { .. } => "TransporterAssigned",
            OrderEvent::StatusChanged { .. } => "StatusChanged",
            OrderEvent::OrderDeleted { .. } => "OrderDeleted",
        }
    }

    pub fn order_id(&self) -> Uuid {
        match self {
            OrderEvent::OrderCreated { order_id, .. }
            | OrderEvent::CompanyAssigned { order_id, .. }
            | OrderEvent::InstallerAssigned { order_id, .. }
            | OrderEvent::TransporterAssigned { order_id, .. }
            | OrderEvent::StatusChanged { order_id, .. }
            | OrderEvent::OrderDeleted { order_id } => *order_id,
        }
    }
}

// ==========================================
// Publisher trait
// ==========================================

/// Implemented by the notification/delivery layer. The engine only
/// knows this trait; failures are logged and swallowed by the caller.
pub trait OrderEventPublisher: Send + Sync {
    fn publish(&self, event: OrderEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Publisher that drops every event. For tests and for deployments
/// without a notification backend.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl OrderEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: OrderEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(kind = event.kind(), order_id = %event.order_id(), "event dropped (no-op publisher)");
        Ok(())
    }
}

/// Wrapper simplifying `Option<Arc<dyn OrderEventPublisher>>`.
#[derive(Clone, Default)]
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn OrderEventPublisher>>,
}

impl OptionalEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn OrderEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }

    /// Publish best-effort: errors are logged at warn and swallowed,
    /// never propagated into the operation result.
    pub fn publish_best_effort(&self, event: OrderEvent) {
        let Some(publisher) = &self.inner else {
            tracing::debug!(kind = event.kind(), "no publisher configured, event skipped");
            return;
        };
        let kind = event.kind();
        let order_id = event.order_id();
        if let Err(e) = publisher.publish(event) {
            tracing::warn!(kind, %order_id, error = %e, "event publish failed, ignoring");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records published events; optionally fails every publish.
    struct RecordingPublisher {
        events: Mutex<Vec<OrderEvent>>,
        fail: bool,
    }

    impl OrderEventPublisher for RecordingPublisher {
        fn publish(&self, event: OrderEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.events.lock().unwrap().push(event);
            if self.fail {
                Err("delivery backend down".into())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn best_effort_swallows_publisher_errors() {
        let publisher = Arc::new(RecordingPublisher {
            events: Mutex::new(Vec::new()),
            fail: true,
        });
        let optional = OptionalEventPublisher::with_publisher(publisher.clone());
        optional.publish_best_effort(OrderEvent::OrderDeleted {
            order_id: Uuid::new_v4(),
        });
        assert_eq!(publisher.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn unconfigured_publisher_is_a_no_op() {
        let optional = OptionalEventPublisher::none();
        assert!(!optional.is_configured());
        optional.publish_best_effort(OrderEvent::OrderDeleted {
            order_id: Uuid::new_v4(),
        });
    }

    #[test]
    fn noop_publisher_accepts_events() {
        let publisher = NoOpEventPublisher;
        let result = publisher.publish(OrderEvent::OrderCreated {
            order_id: Uuid::new_v4(),
            order_no: "ZL-2024-0001".to_string(),
        });
        assert!(result.is_ok());
    }
}
