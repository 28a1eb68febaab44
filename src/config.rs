// ==========================================
// Install Orders - runtime configuration
// ==========================================

use serde::{Deserialize, Serialize};

use crate::engine::assignment::AUTO_INSTALL_LEAD_DAYS;

/// Crate-level runtime settings, loadable from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file path.
    pub db_path: String,
    /// Lead days used when an auto-assignment has to invent an
    /// installation date.
    pub auto_install_lead_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "install_orders.db".to_string(),
            auto_install_lead_days: AUTO_INSTALL_LEAD_DAYS,
        }
    }
}

impl AppConfig {
    /// Read settings from the environment, falling back to defaults.
    ///
    /// # Environment
    /// - INSTALL_ORDERS_DB: database path
    /// - INSTALL_ORDERS_AUTO_LEAD_DAYS: auto installation lead
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let db_path = std::env::var("INSTALL_ORDERS_DB").unwrap_or(defaults.db_path);
        let auto_install_lead_days = std::env::var("INSTALL_ORDERS_AUTO_LEAD_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.auto_install_lead_days);
        Self {
            db_path,
            auto_install_lead_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.auto_install_lead_days, 2);
        assert!(!cfg.db_path.is_empty());
    }
}
