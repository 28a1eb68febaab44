// ==========================================
// Install Orders - capability checker
// ==========================================
// Pure functions: map free-text service types to capabilities
// and test whether a person holds one. No I/O, no state.
// ==========================================

use crate::domain::person::Person;
use crate::domain::types::{Capability, ServiceFamily};

/// Service family of a free-text service type.
///
/// Case-insensitive substring match: "drzwi" wins over "podłog"
/// when both appear, matching the order of the capability lookup.
pub fn service_family(service_type: &str) -> ServiceFamily {
    let folded = service_type.to_lowercase();
    if folded.contains("drzwi") {
        ServiceFamily::Door
    } else if folded.contains("podłog") {
        ServiceFamily::Floor
    } else {
        ServiceFamily::Other
    }
}

/// Capability required to perform an order's service type.
///
/// `None` means the service type is unrecognized; the caller must
/// then skip capability checks entirely and allow the assignment.
/// That permissiveness is intentional, not an error path.
pub fn required_capability(service_type: &str) -> Option<Capability> {
    let folded = service_type.to_lowercase();
    if folded.contains("drzwi") {
        Some(Capability::InstallDoors)
    } else if folded.contains("podłog") {
        Some(Capability::InstallFloors)
    } else if folded.contains("transport") {
        Some(Capability::Transport)
    } else {
        None
    }
}

/// Does the person hold the capability?
///
/// Transport is matched by case-insensitive substring ("Transport
/// mebli" counts); installation specializations are matched by the
/// exact label, a person listing only "Montaż" does not qualify.
pub fn has_capability(person: &Person, capability: Capability) -> bool {
    match capability {
        Capability::Transport => person
            .services
            .iter()
            .any(|s| s.to_lowercase().contains("transport")),
        Capability::InstallDoors | Capability::InstallFloors => {
            let label = capability.label();
            person.services.iter().any(|s| s.trim() == label)
        }
    }
}

/// Should this person be treated as an installer for the given family?
///
/// True when they hold the matching installation capability, or hold
/// any capability at all unless Transport is the only one. Used by
/// the one-person-company auto-assignment.
pub fn acts_as_installer(person: &Person, family: ServiceFamily) -> bool {
    let install_cap = match family {
        ServiceFamily::Door => Some(Capability::InstallDoors),
        ServiceFamily::Floor => Some(Capability::InstallFloors),
        ServiceFamily::Other => None,
    };
    if let Some(cap) = install_cap {
        if has_capability(person, cap) {
            return true;
        }
    }
    if person.services.is_empty() {
        return false;
    }
    // Any capability counts, unless the list is transport-only.
    !person
        .services
        .iter()
        .all(|s| s.to_lowercase().contains("transport"))
}
