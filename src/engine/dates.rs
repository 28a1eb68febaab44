// ==========================================
// Install Orders - transport date rules
// ==========================================
// Pure temporal feasibility checks between transport and
// installation dates, parameterized by service family.
// ==========================================

use chrono::{Duration, NaiveDate};

use crate::domain::types::ServiceFamily;
use crate::engine::capability::service_family;

/// Floor deliveries must acclimatize on site before installation.
pub const FLOOR_LEAD_DAYS: i64 = 2;
/// Door deliveries arrive the day before by default.
pub const DOOR_LEAD_DAYS: i64 = 1;

/// Outcome of a transport date check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCheck {
    Ok,
    Rejected(String),
}

impl DateCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, DateCheck::Ok)
    }
}

/// Validate a candidate transport date against the order's
/// installation date.
///
/// With no installation date the check is skipped. Transport after
/// installation is always rejected. For the floor family, dates in
/// the open interval (installation - 2 days, installation) are
/// rejected; both boundaries are accepted. `transport ==
/// installation` being accepted looks like it contradicts the
/// two-day intent, but it is the historical behavior and must not
/// be narrowed here.
pub fn validate_transport_date(
    service_type: &str,
    transport_date: NaiveDate,
    installation_date: Option<NaiveDate>,
) -> DateCheck {
    let installation_date = match installation_date {
        Some(d) => d,
        None => return DateCheck::Ok,
    };

    if transport_date > installation_date {
        return DateCheck::Rejected(
            "transport date cannot be after installation date".to_string(),
        );
    }

    if service_family(service_type) == ServiceFamily::Floor {
        let min_transport_date = installation_date - Duration::days(FLOOR_LEAD_DAYS);
        if transport_date > min_transport_date && transport_date < installation_date {
            return DateCheck::Rejected(
                "floor installation transport must be at least 2 days before installation"
                    .to_string(),
            );
        }
    }

    DateCheck::Ok
}

/// Default transport date when the caller supplies none.
///
/// Door: day before installation. Floor and unrecognized: two days
/// before. With no installation date scheduled yet: tomorrow.
pub fn default_transport_date(
    family: ServiceFamily,
    installation_date: Option<NaiveDate>,
    today: NaiveDate,
) -> NaiveDate {
    match installation_date {
        Some(install) => {
            let lead = match family {
                ServiceFamily::Door => DOOR_LEAD_DAYS,
                ServiceFamily::Floor | ServiceFamily::Other => FLOOR_LEAD_DAYS,
            };
            install - Duration::days(lead)
        }
        None => today + Duration::days(1),
    }
}
