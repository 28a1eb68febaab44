// ==========================================
// Install Orders - status normalizer
// ==========================================
// Ingress adapter for the several historical status spellings.
// Applied only where raw strings enter the engine; core logic
// sees the closed enums exclusively.
// ==========================================

use tracing::warn;

use crate::domain::types::{InstallationStatus, TransportStatus};

/// Normalize a raw installation status string.
///
/// Case-folds and trims, accepts canonical tokens and the legacy
/// synonym table. Unmatched non-empty input silently falls back to
/// `New` — preserved legacy behavior, logged at warn so the
/// fallback is at least visible. `None` in, `None` out.
pub fn normalize_installation_status(raw: Option<&str>) -> Option<InstallationStatus> {
    let raw = raw?;
    let folded = raw.trim().to_lowercase();
    let status = match folded.as_str() {
        // Canonical tokens
        "nowe" => InstallationStatus::New,
        "zaplanowane" => InstallationStatus::Scheduled,
        "w trakcie" => InstallationStatus::InProgress,
        "wykonane" => InstallationStatus::Completed,
        "reklamacja" => InstallationStatus::Complaint,
        // Legacy synonyms
        "nowy" | "nowa" | "nowe zlecenie" => InstallationStatus::New,
        "zaplanowany" | "montaż zaplanowany" | "montaz zaplanowany" => {
            InstallationStatus::Scheduled
        }
        "w realizacji" | "realizacja" => InstallationStatus::InProgress,
        "montaż wykonany" | "montaz wykonany" | "zakończone" | "zakonczone" => {
            InstallationStatus::Completed
        }
        "reklamacje" | "zgłoszona reklamacja" | "zgloszona reklamacja" => {
            InstallationStatus::Complaint
        }
        other => {
            warn!(raw = other, "unrecognized installation status, defaulting to New");
            InstallationStatus::New
        }
    };
    Some(status)
}

/// Normalize a raw transport status string.
///
/// Same contract as installation; the silent fallback is `Scheduled`.
pub fn normalize_transport_status(raw: Option<&str>) -> Option<TransportStatus> {
    let raw = raw?;
    let folded = raw.trim().to_lowercase();
    let status = match folded.as_str() {
        // Canonical tokens
        "gotowe" => TransportStatus::Ready,
        "zaplanowany" => TransportStatus::Scheduled,
        "dostarczone" => TransportStatus::Delivered,
        // Legacy synonyms
        "gotowe do transportu" | "gotowy" => TransportStatus::Ready,
        "zaplanowane" | "transport zaplanowany" => TransportStatus::Scheduled,
        "dostarczono" | "transport wykonany" | "dostarczony" => TransportStatus::Delivered,
        other => {
            warn!(raw = other, "unrecognized transport status, defaulting to Scheduled");
            TransportStatus::Scheduled
        }
    };
    Some(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_tokens_pass_through() {
        assert_eq!(
            normalize_installation_status(Some("wykonane")),
            Some(InstallationStatus::Completed)
        );
        assert_eq!(
            normalize_transport_status(Some("dostarczone")),
            Some(TransportStatus::Delivered)
        );
    }

    #[test]
    fn legacy_spellings_map_to_canonical() {
        assert_eq!(
            normalize_installation_status(Some("Montaż wykonany")),
            Some(InstallationStatus::Completed)
        );
        assert_eq!(
            normalize_transport_status(Some("transport zaplanowany")),
            Some(TransportStatus::Scheduled)
        );
        assert_eq!(
            normalize_transport_status(Some("  Gotowe do transportu ")),
            Some(TransportStatus::Ready)
        );
    }

    #[test]
    fn unmatched_input_falls_back_to_default() {
        assert_eq!(
            normalize_installation_status(Some("???")),
            Some(InstallationStatus::New)
        );
        assert_eq!(
            normalize_transport_status(Some("w drodze")),
            Some(TransportStatus::Scheduled)
        );
    }

    #[test]
    fn none_in_none_out() {
        assert_eq!(normalize_installation_status(None), None);
        assert_eq!(normalize_transport_status(None), None);
    }

    #[test]
    fn normalization_is_idempotent_through_canonical_token() {
        let inputs = [
            "gotowe",
            "zaplanowany",
            "dostarczone",
            "gotowe do transportu",
            "transport zaplanowany",
            "dostarczono",
            "cokolwiek innego",
        ];
        for raw in inputs {
            let once = normalize_transport_status(Some(raw)).unwrap();
            let twice = normalize_transport_status(Some(once.as_str())).unwrap();
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }
}
