// ==========================================
// Install Orders - one-person-company resolver
// ==========================================
// A "one-person company" is a partner represented by a single
// individual who is both the assignment target (company) and the
// person performing the work (installer role). The decisive signal
// is the installer-role person's capability list, not the mere
// existence of a company user row.
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::domain::company::Company;
use crate::domain::person::Person;
use crate::domain::types::OperatorKind;
use crate::engine::error::EngineResult;
use crate::repository::PersonRepository;

pub struct SoleOperatorResolver {
    persons: Arc<PersonRepository>,
}

impl SoleOperatorResolver {
    pub fn new(persons: Arc<PersonRepository>) -> Self {
        Self { persons }
    }

    /// Resolve the sole operator of a company, if it has one.
    ///
    /// The explicit `operator_kind` tag on the company wins; it is
    /// set at company creation/update time and invalidated there,
    /// never recomputed per request. When the tag points at a person
    /// who no longer exists or lost the installer role, or the
    /// company is untagged, fall back to scanning installer-role
    /// members: exactly one member means a de-facto sole operator.
    pub fn resolve(&self, company: &Company) -> EngineResult<Option<Person>> {
        if let OperatorKind::SoleOperator(person_id) = &company.operator_kind {
            let person_id = *person_id;
            if let Some(person) = self.persons.find_by_id(person_id)? {
                if person.is_installer() && person.belongs_to(company.company_id) {
                    return Ok(Some(person));
                }
                debug!(
                    company_id = %company.company_id,
                    person_id = %person_id,
                    "stale sole-operator tag, falling back to scan"
                );
            }
        }

        let installers = self.persons.list_installers(company.company_id)?;
        if installers.len() == 1 {
            return Ok(installers.into_iter().next());
        }
        Ok(None)
    }
}
