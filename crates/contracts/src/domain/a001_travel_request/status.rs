use serde::{Deserialize, Serialize};

/// Lifecycle state of a travel request, as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Draft,
    PendingReview,
    ChangesNeeded,
    Approved,
    InProgress,
    PendingVouchersApproval,
    PendingRefundApproval,
    Completed,
    Denied,
    Cancelled,
    /// Any state this client does not know about yet
    #[serde(other)]
    Unknown,
}

/// Visual tone used by status badges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Informative,
    Warning,
    Success,
    Danger,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 10] = [
        RequestStatus::Draft,
        RequestStatus::PendingReview,
        RequestStatus::ChangesNeeded,
        RequestStatus::Approved,
        RequestStatus::InProgress,
        RequestStatus::PendingVouchersApproval,
        RequestStatus::PendingRefundApproval,
        RequestStatus::Completed,
        RequestStatus::Denied,
        RequestStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Draft => "Borrador",
            RequestStatus::PendingReview => "Pendiente de revisión",
            RequestStatus::ChangesNeeded => "Cambios necesarios",
            RequestStatus::Approved => "Aprobado",
            RequestStatus::InProgress => "En progreso",
            RequestStatus::PendingVouchersApproval => "Comprobantes en revisión",
            RequestStatus::PendingRefundApproval => "Reembolso pendiente",
            RequestStatus::Completed => "Completado",
            RequestStatus::Denied => "Denegado",
            RequestStatus::Cancelled => "Cancelado",
            RequestStatus::Unknown => "Desconocido",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            RequestStatus::Draft | RequestStatus::Unknown => StatusTone::Neutral,
            RequestStatus::PendingReview
            | RequestStatus::PendingVouchersApproval
            | RequestStatus::PendingRefundApproval => StatusTone::Warning,
            RequestStatus::ChangesNeeded | RequestStatus::InProgress => StatusTone::Informative,
            RequestStatus::Approved | RequestStatus::Completed => StatusTone::Success,
            RequestStatus::Denied | RequestStatus::Cancelled => StatusTone::Danger,
        }
    }

    /// The requester may still withdraw the trip
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            RequestStatus::Draft
                | RequestStatus::PendingReview
                | RequestStatus::ChangesNeeded
                | RequestStatus::Approved
        )
    }

    /// The requester may resubmit the form
    pub fn can_edit(&self) -> bool {
        matches!(self, RequestStatus::Draft | RequestStatus::ChangesNeeded)
    }

    /// Vouchers are uploaded only while the trip is in progress
    pub fn accepts_vouchers(&self) -> bool {
        matches!(self, RequestStatus::InProgress)
    }

    /// Approved trips still waiting for an agency booking
    pub fn awaits_booking(&self) -> bool {
        matches!(self, RequestStatus::Approved)
    }

    pub fn is_final(&self) -> bool {
        matches!(
            self,
            RequestStatus::Completed | RequestStatus::Denied | RequestStatus::Cancelled
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_known_and_unknown() {
        let status: RequestStatus = serde_json::from_str("\"pending_refund_approval\"").unwrap();
        assert_eq!(status, RequestStatus::PendingRefundApproval);

        let status: RequestStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, RequestStatus::Unknown);
    }

    #[test]
    fn test_action_rules() {
        assert!(RequestStatus::ChangesNeeded.can_edit());
        assert!(RequestStatus::ChangesNeeded.can_cancel());
        assert!(!RequestStatus::InProgress.can_cancel());
        assert!(RequestStatus::InProgress.accepts_vouchers());
        assert!(!RequestStatus::Approved.accepts_vouchers());
        assert!(RequestStatus::Cancelled.is_final());
        assert!(!RequestStatus::PendingReview.is_final());
    }

    #[test]
    fn test_every_state_has_spanish_label() {
        for status in RequestStatus::ALL {
            assert!(!status.label().is_empty());
            assert_ne!(status.label(), RequestStatus::Unknown.label());
        }
    }
}
