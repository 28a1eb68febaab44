// ==========================================
// Install Orders - assignment engine
// ==========================================
// Orchestrates capability checks, date rules, the sole-operator
// resolver and the status normalizer into the four order commands
// plus the auxiliary mutators. Every operation is a synchronous
// load / check / mutate / persist sequence; the optimistic revision
// on Order turns racing writers into OptimisticLockFailure.
// ==========================================

use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::order::Order;
use crate::domain::types::{Capability, InstallationStatus, Role, TransportStatus};
use crate::engine::capability::{acts_as_installer, has_capability, required_capability};
use crate::engine::dates::{default_transport_date, validate_transport_date, DateCheck};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::events::{OptionalEventPublisher, OrderEvent};
use crate::engine::repositories::EngineRepositories;
use crate::engine::sole_operator::SoleOperatorResolver;
use crate::engine::status::{normalize_installation_status, normalize_transport_status};

/// Lead applied when a sole-operator auto-assignment has to invent
/// an installation date: now + 2 days.
pub const AUTO_INSTALL_LEAD_DAYS: i64 = 2;

// ==========================================
// Commands
// ==========================================
// Status fields carry raw strings; they are normalized at this
// ingress and nowhere else.

#[derive(Debug, Clone)]
pub struct CreateOrderCmd {
    pub store_id: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_address: String,
    pub service_type: String,
    pub with_transport: bool,
    pub company_id: Uuid,
    pub installation_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct AssignInstallerCmd {
    pub order_id: Uuid,
    pub installer_id: Uuid,
    pub installation_date: NaiveDate,
    /// Optional target status; defaults to Scheduled.
    pub installation_status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AssignTransporterCmd {
    pub order_id: Uuid,
    /// Ignored when the one-person-company short-circuit applies.
    pub transporter_id: Option<Uuid>,
    /// Required on the standard path; defaulted on the short-circuit.
    pub transport_date: Option<NaiveDate>,
    pub transport_status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AssignCompanyCmd {
    pub order_id: Uuid,
    pub company_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateStatusCmd {
    pub order_id: Uuid,
    pub installation_status: Option<String>,
    pub transport_status: Option<String>,
    pub installation_date: Option<NaiveDate>,
    pub comments: Option<String>,
    /// Replaces the photo list; the upload collaborator path uses
    /// `add_complaint_photos` to append instead.
    pub complaint_photos: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct FinancialFlagsCmd {
    pub order_id: Uuid,
    pub invoice_issued: Option<bool>,
    pub will_be_settled: Option<bool>,
}

// ==========================================
// AssignmentEngine
// ==========================================
pub struct AssignmentEngine {
    repos: EngineRepositories,
    resolver: SoleOperatorResolver,
    publisher: OptionalEventPublisher,
    auto_install_lead_days: i64,
    /// Test hook; production uses the local calendar date.
    fixed_today: Option<NaiveDate>,
}

impl AssignmentEngine {
    pub fn new(repos: EngineRepositories, publisher: OptionalEventPublisher) -> Self {
        let resolver = SoleOperatorResolver::new(repos.persons.clone());
        Self {
            repos,
            resolver,
            publisher,
            auto_install_lead_days: AUTO_INSTALL_LEAD_DAYS,
            fixed_today: None,
        }
    }

    pub fn with_auto_install_lead(mut self, days: i64) -> Self {
        self.auto_install_lead_days = days;
        self
    }

    /// Pin "today" for deterministic tests.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }

    // ==========================================
    // create_order
    // ==========================================

    pub fn create_order(&self, cmd: CreateOrderCmd) -> EngineResult<Order> {
        for (field, value) in [
            ("store_id", &cmd.store_id),
            ("client_name", &cmd.client_name),
            ("client_address", &cmd.client_address),
            ("service_type", &cmd.service_type),
        ] {
            if value.trim().is_empty() {
                return Err(EngineError::ValidationError(format!(
                    "missing required field: {field}"
                )));
            }
        }

        let company = self
            .repos
            .companies
            .find_by_id(cmd.company_id)?
            .ok_or_else(|| EngineError::not_found("Company", cmd.company_id))?;

        let today = self.today();
        let order_no = self.repos.orders.next_order_no(chrono::Datelike::year(&today))?;
        let now = Local::now().naive_local();

        let order = Order {
            order_id: Uuid::new_v4(),
            order_no: order_no.clone(),
            store_id: cmd.store_id,
            client_name: cmd.client_name,
            client_phone: cmd.client_phone,
            client_address: cmd.client_address,
            service_type: cmd.service_type,
            with_transport: cmd.with_transport,
            installation_status: InstallationStatus::New,
            transport_status: cmd.with_transport.then_some(TransportStatus::Ready),
            company_id: company.company_id,
            company_name: company.name,
            installer_id: None,
            installer_name: None,
            transporter_id: None,
            transporter_name: None,
            installation_date: cmd.installation_date,
            transport_date: None,
            complaint_notes: None,
            complaint_photos: Vec::new(),
            notes: None,
            invoice_issued: false,
            will_be_settled: false,
            created_at: now,
            updated_at: now,
            revision: 0,
        };
        self.repos.orders.create(&order)?;

        info!(order_id = %order.order_id, order_no = %order_no, "order created");
        self.publisher.publish_best_effort(OrderEvent::OrderCreated {
            order_id: order.order_id,
            order_no: order.order_no.clone(),
        });
        Ok(order)
    }

    // ==========================================
    // assign_installer
    // ==========================================

    pub fn assign_installer(&self, cmd: AssignInstallerCmd) -> EngineResult<Order> {
        let mut order = self.load_order(cmd.order_id)?;

        let installer = self
            .repos
            .persons
            .find_by_id(cmd.installer_id)?
            .ok_or_else(|| EngineError::not_found("Person", cmd.installer_id))?;
        if installer.role != Role::Installer {
            return Err(EngineError::BusinessRuleViolation(format!(
                "person {} has role {}, expected installer",
                installer.name, installer.role
            )));
        }
        if !installer.belongs_to(order.company_id) {
            return Err(EngineError::BusinessRuleViolation(format!(
                "installer {} does not belong to company {}",
                installer.name, order.company_name
            )));
        }
        if let Some(cap @ (Capability::InstallDoors | Capability::InstallFloors)) =
            required_capability(&order.service_type)
        {
            if !has_capability(&installer, cap) {
                return Err(EngineError::BusinessRuleViolation(format!(
                    "installer {} lacks capability \"{}\"",
                    installer.name,
                    cap.label()
                )));
            }
        }

        order.installer_id = Some(installer.person_id);
        order.installer_name = Some(installer.name.clone());
        order.installation_date = Some(cmd.installation_date);
        // Explicit assignment always overwrites the status, even a
        // "later" one; there is deliberately no forward-only machine.
        order.installation_status = normalize_installation_status(
            cmd.installation_status.as_deref(),
        )
        .unwrap_or(InstallationStatus::Scheduled);

        self.persist(&mut order)?;
        info!(order_id = %order.order_id, installer = %installer.name, "installer assigned");
        self.publisher
            .publish_best_effort(OrderEvent::InstallerAssigned {
                order_id: order.order_id,
                installer_id: installer.person_id,
                installation_date: cmd.installation_date,
            });
        Ok(order)
    }

    // ==========================================
    // assign_transporter
    // ==========================================

    pub fn assign_transporter(&self, cmd: AssignTransporterCmd) -> EngineResult<Order> {
        let mut order = self.load_order(cmd.order_id)?;
        if !order.with_transport {
            return Err(EngineError::BusinessRuleViolation(format!(
                "order {} was created without transport",
                order.order_no
            )));
        }

        // One-person-company short-circuit: an installer already on
        // the order who can also transport takes the job, whatever
        // transporter the caller pointed at.
        if let Some(installer_id) = order.installer_id {
            if let Some(installer) = self.repos.persons.find_by_id(installer_id)? {
                if installer.belongs_to(order.company_id)
                    && has_capability(&installer, Capability::Transport)
                {
                    debug!(
                        order_id = %order.order_id,
                        installer = %installer.name,
                        "transporter short-circuit: installer doubles as transporter"
                    );
                    let transport_date = cmd.transport_date.unwrap_or_else(|| {
                        default_transport_date(
                            order.service_family(),
                            order.installation_date,
                            self.today(),
                        )
                    });
                    order.transporter_id = Some(installer.person_id);
                    order.transporter_name = Some(installer.name.clone());
                    order.transport_date = Some(transport_date);
                    order.transport_status = Some(
                        normalize_transport_status(cmd.transport_status.as_deref())
                            .unwrap_or(TransportStatus::Scheduled),
                    );

                    self.persist(&mut order)?;
                    self.publisher
                        .publish_best_effort(OrderEvent::TransporterAssigned {
                            order_id: order.order_id,
                            transporter_id: installer.person_id,
                            transport_date: order.transport_date,
                        });
                    return Ok(order);
                }
            }
        }

        // Standard path.
        let transporter_id = cmd.transporter_id.ok_or_else(|| {
            EngineError::ValidationError("transporter_id is required".to_string())
        })?;
        let transport_date = cmd.transport_date.ok_or_else(|| {
            EngineError::ValidationError("transport_date is required".to_string())
        })?;

        let transporter = self
            .repos
            .persons
            .find_by_id(transporter_id)?
            .ok_or_else(|| EngineError::not_found("Person", transporter_id))?;
        if !transporter.belongs_to(order.company_id) {
            return Err(EngineError::BusinessRuleViolation(format!(
                "transporter {} does not belong to company {}",
                transporter.name, order.company_name
            )));
        }
        if !has_capability(&transporter, Capability::Transport) {
            return Err(EngineError::BusinessRuleViolation(format!(
                "transporter {} lacks the Transport capability",
                transporter.name
            )));
        }
        if let DateCheck::Rejected(reason) =
            validate_transport_date(&order.service_type, transport_date, order.installation_date)
        {
            return Err(EngineError::BusinessRuleViolation(reason));
        }

        order.transporter_id = Some(transporter.person_id);
        order.transporter_name = Some(transporter.name.clone());
        order.transport_date = Some(transport_date);
        order.transport_status = Some(
            normalize_transport_status(cmd.transport_status.as_deref())
                .unwrap_or(TransportStatus::Scheduled),
        );

        self.persist(&mut order)?;
        info!(order_id = %order.order_id, transporter = %transporter.name, "transporter assigned");
        self.publisher
            .publish_best_effort(OrderEvent::TransporterAssigned {
                order_id: order.order_id,
                transporter_id: transporter.person_id,
                transport_date: order.transport_date,
            });
        Ok(order)
    }

    // ==========================================
    // assign_company
    // ==========================================

    /// Assign a company and, for one-person companies, auto-assign
    /// the sole operator into the installer and transporter slots
    /// their capabilities allow. Best effort: a skipped sub-step
    /// (missing capability) does not fail the operation, the order
    /// is returned with whatever got assigned.
    pub fn assign_company(&self, cmd: AssignCompanyCmd) -> EngineResult<Order> {
        let mut order = self.load_order(cmd.order_id)?;
        let company = self
            .repos
            .companies
            .find_by_id(cmd.company_id)?
            .ok_or_else(|| EngineError::not_found("Company", cmd.company_id))?;

        order.company_id = company.company_id;
        order.company_name = company.name.clone();

        match self.resolver.resolve(&company)? {
            Some(operator) => {
                let family = order.service_family();
                if acts_as_installer(&operator, family) {
                    order.installer_id = Some(operator.person_id);
                    order.installer_name = Some(operator.name.clone());
                    order.installation_status = InstallationStatus::Scheduled;
                    if order.installation_date.is_none() {
                        order.installation_date =
                            Some(self.today() + Duration::days(self.auto_install_lead_days));
                    }
                    debug!(
                        order_id = %order.order_id,
                        operator = %operator.name,
                        "sole operator auto-assigned as installer"
                    );
                }
                if order.with_transport && has_capability(&operator, Capability::Transport) {
                    order.transporter_id = Some(operator.person_id);
                    order.transporter_name = Some(operator.name.clone());
                    order.transport_date = Some(default_transport_date(
                        family,
                        order.installation_date,
                        self.today(),
                    ));
                    order.transport_status = Some(TransportStatus::Scheduled);
                    debug!(
                        order_id = %order.order_id,
                        operator = %operator.name,
                        "sole operator auto-assigned as transporter"
                    );
                }
            }
            None => {
                // Lower-assurance legacy fallback: first installer-role
                // member, no capability check.
                if order.installer_id.is_none() {
                    let members = self.repos.persons.list_installers(company.company_id)?;
                    if let Some(first) = members.into_iter().next() {
                        order.installer_id = Some(first.person_id);
                        order.installer_name = Some(first.name.clone());
                        debug!(
                            order_id = %order.order_id,
                            installer = %first.name,
                            "fallback installer pick (no capability check)"
                        );
                    }
                }
            }
        }

        self.persist(&mut order)?;
        info!(order_id = %order.order_id, company = %order.company_name, "company assigned");
        self.publisher
            .publish_best_effort(OrderEvent::CompanyAssigned {
                order_id: order.order_id,
                company_id: company.company_id,
            });
        Ok(order)
    }

    // ==========================================
    // update_status
    // ==========================================

    pub fn update_status(&self, cmd: UpdateStatusCmd) -> EngineResult<Order> {
        let mut order = self.load_order(cmd.order_id)?;

        if let Some(status) = normalize_installation_status(cmd.installation_status.as_deref()) {
            // Arbitrary regression is allowed on purpose.
            order.installation_status = status;
        }

        if let Some(date) = cmd.installation_date {
            order.installation_date = Some(date);
            if order.is_new() {
                order.installation_status = InstallationStatus::Scheduled;
            }
        }

        if let Some(status) = normalize_transport_status(cmd.transport_status.as_deref()) {
            // Only meaningful with transport; silently ignored otherwise.
            if order.with_transport {
                order.transport_status = Some(status);
            }
        }

        if let Some(photos) = cmd.complaint_photos {
            order.complaint_photos = photos;
        }

        if let Some(comment) = cmd.comments.as_deref() {
            if order.installation_status == InstallationStatus::Complaint {
                order.complaint_notes = Some(comment.to_string());
            } else {
                order.append_note(comment);
            }
        }

        self.persist(&mut order)?;
        info!(
            order_id = %order.order_id,
            installation_status = %order.installation_status,
            "status updated"
        );
        self.publisher.publish_best_effort(OrderEvent::StatusChanged {
            order_id: order.order_id,
            installation_status: order.installation_status,
            transport_status: order.transport_status,
        });
        Ok(order)
    }

    // ==========================================
    // Auxiliary mutators
    // ==========================================

    /// Less-restrictive path for the two financial flags; no
    /// capability or date checks apply.
    pub fn update_financial_flags(&self, cmd: FinancialFlagsCmd) -> EngineResult<Order> {
        let mut order = self.load_order(cmd.order_id)?;
        if let Some(v) = cmd.invoice_issued {
            order.invoice_issued = v;
        }
        if let Some(v) = cmd.will_be_settled {
            order.will_be_settled = v;
        }
        self.persist(&mut order)?;
        Ok(order)
    }

    /// Photo-upload collaborator path: append opaque references.
    pub fn add_complaint_photos(
        &self,
        order_id: Uuid,
        photo_refs: Vec<String>,
    ) -> EngineResult<Order> {
        if photo_refs.is_empty() {
            return Err(EngineError::ValidationError(
                "no photo references supplied".to_string(),
            ));
        }
        let mut order = self.load_order(order_id)?;
        order.complaint_photos.extend(photo_refs);
        self.persist(&mut order)?;
        Ok(order)
    }

    /// Explicit deletion of a single photo reference.
    pub fn remove_complaint_photo(&self, order_id: Uuid, photo_ref: &str) -> EngineResult<Order> {
        let mut order = self.load_order(order_id)?;
        let before = order.complaint_photos.len();
        order.complaint_photos.retain(|p| p != photo_ref);
        if order.complaint_photos.len() == before {
            return Err(EngineError::ValidationError(format!(
                "photo reference not on order: {photo_ref}"
            )));
        }
        self.persist(&mut order)?;
        Ok(order)
    }

    /// Explicit delete with no cascading business logic.
    pub fn delete_order(&self, order_id: Uuid) -> EngineResult<()> {
        if !self.repos.orders.delete(order_id)? {
            return Err(EngineError::not_found("Order", order_id));
        }
        info!(%order_id, "order deleted");
        self.publisher
            .publish_best_effort(OrderEvent::OrderDeleted { order_id });
        Ok(())
    }

    // ==========================================
    // Internals
    // ==========================================

    fn load_order(&self, order_id: Uuid) -> EngineResult<Order> {
        self.repos
            .orders
            .find_by_id(order_id)?
            .ok_or_else(|| EngineError::not_found("Order", order_id))
    }

    fn persist(&self, order: &mut Order) -> EngineResult<()> {
        order.updated_at = Local::now().naive_local();
        order.revision = self.repos.orders.update(order)?;
        Ok(())
    }
}
