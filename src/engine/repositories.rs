// ==========================================
// Install Orders - engine repository aggregation
// ==========================================
// Bundles the repositories the assignment engine needs, keeping
// its constructor to a single dependency parameter.
// ==========================================

use std::sync::Arc;

use crate::repository::{CompanyRepository, OrderRepository, PersonRepository};

#[derive(Clone)]
pub struct EngineRepositories {
    pub orders: Arc<OrderRepository>,
    pub persons: Arc<PersonRepository>,
    pub companies: Arc<CompanyRepository>,
}

impl EngineRepositories {
    pub fn new(
        orders: Arc<OrderRepository>,
        persons: Arc<PersonRepository>,
        companies: Arc<CompanyRepository>,
    ) -> Self {
        Self {
            orders,
            persons,
            companies,
        }
    }
}
