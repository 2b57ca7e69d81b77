//! Approval state machine for leave/exchange requests.
//!
//! `Pending -> {Partner Approved, Rejected}` when the exchange partner must
//! sign off first, `Pending -> {Approved, Rejected}` otherwise, and
//! `Partner Approved -> {Approved, Rejected}` for the final admin decision.
//! `Approved` and `Rejected` are terminal.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum RequestStatus {
    Pending,
    #[serde(rename = "Partner Approved")]
    #[strum(serialize = "Partner Approved")]
    PartnerApproved,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("Request is already {0}")]
    AlreadyDecided(RequestStatus),
    #[error("Only the nominated exchange partner may act on this request")]
    NotThePartner,
    #[error("Partner approval only applies to a pending exchange request")]
    PartnerDecisionNotPending,
    #[error("{0}")]
    NotEligible(String),
}

/// Result of the admin-approval eligibility check, surfaced verbatim to the
/// caller when `can_approve` is false.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApprovalGate {
    pub can_approve: bool,
    #[schema(example = "Ready for admin approval")]
    pub reason: String,
}

impl ApprovalGate {
    fn allow(reason: &str) -> Self {
        ApprovalGate {
            can_approve: true,
            reason: reason.to_string(),
        }
    }

    fn deny(reason: &str) -> Self {
        ApprovalGate {
            can_approve: false,
            reason: reason.to_string(),
        }
    }
}

/// The authoritative gate an admin approval must pass. Checked again inside
/// the approve handler, not just on the read endpoint.
pub fn can_admin_approve(status: RequestStatus, requires_partner_approval: bool) -> ApprovalGate {
    match status {
        RequestStatus::Approved | RequestStatus::Rejected => {
            ApprovalGate::deny("Request has already been decided")
        }
        RequestStatus::Pending if requires_partner_approval => {
            ApprovalGate::deny("The exchange partner has not approved this request yet")
        }
        RequestStatus::Pending => ApprovalGate::allow("Ready for admin approval"),
        RequestStatus::PartnerApproved => {
            ApprovalGate::allow("Partner approved; ready for admin approval")
        }
    }
}

/// The nominated partner accepts or declines a pending exchange request.
pub fn partner_decision(
    status: RequestStatus,
    approved: bool,
) -> Result<RequestStatus, TransitionError> {
    if status != RequestStatus::Pending {
        return Err(TransitionError::PartnerDecisionNotPending);
    }
    Ok(if approved {
        RequestStatus::PartnerApproved
    } else {
        RequestStatus::Rejected
    })
}

/// Final admin approval, guarded by [`can_admin_approve`].
pub fn admin_approve(
    status: RequestStatus,
    requires_partner_approval: bool,
) -> Result<RequestStatus, TransitionError> {
    let gate = can_admin_approve(status, requires_partner_approval);
    if !gate.can_approve {
        return Err(TransitionError::NotEligible(gate.reason));
    }
    Ok(RequestStatus::Approved)
}

/// Admin rejection is unconditional at Pending or Partner Approved.
pub fn admin_reject(status: RequestStatus) -> Result<RequestStatus, TransitionError> {
    if status.is_terminal() {
        return Err(TransitionError::AlreadyDecided(status));
    }
    Ok(RequestStatus::Rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_as_text() {
        assert_eq!(RequestStatus::PartnerApproved.to_string(), "Partner Approved");
        assert_eq!(
            "Partner Approved".parse::<RequestStatus>().unwrap(),
            RequestStatus::PartnerApproved
        );
        assert_eq!("Pending".parse::<RequestStatus>().unwrap(), RequestStatus::Pending);
    }

    #[test]
    fn gate_blocks_pending_exchange_awaiting_partner() {
        let gate = can_admin_approve(RequestStatus::Pending, true);
        assert!(!gate.can_approve);
        assert!(gate.reason.contains("partner"));
    }

    #[test]
    fn gate_allows_plain_pending_request() {
        assert!(can_admin_approve(RequestStatus::Pending, false).can_approve);
    }

    #[test]
    fn gate_allows_partner_approved_request() {
        assert!(can_admin_approve(RequestStatus::PartnerApproved, true).can_approve);
    }

    #[test]
    fn gate_blocks_terminal_states() {
        assert!(!can_admin_approve(RequestStatus::Approved, false).can_approve);
        assert!(!can_admin_approve(RequestStatus::Rejected, false).can_approve);
    }

    #[test]
    fn partner_accept_and_decline() {
        assert_eq!(
            partner_decision(RequestStatus::Pending, true),
            Ok(RequestStatus::PartnerApproved)
        );
        assert_eq!(
            partner_decision(RequestStatus::Pending, false),
            Ok(RequestStatus::Rejected)
        );
    }

    #[test]
    fn partner_cannot_act_after_decision() {
        for status in [
            RequestStatus::PartnerApproved,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(
                partner_decision(status, true),
                Err(TransitionError::PartnerDecisionNotPending)
            );
        }
    }

    #[test]
    fn admin_approve_respects_gate() {
        assert_eq!(
            admin_approve(RequestStatus::Pending, true),
            Err(TransitionError::NotEligible(
                "The exchange partner has not approved this request yet".to_string()
            ))
        );
        assert_eq!(
            admin_approve(RequestStatus::PartnerApproved, true),
            Ok(RequestStatus::Approved)
        );
        assert_eq!(
            admin_approve(RequestStatus::Pending, false),
            Ok(RequestStatus::Approved)
        );
    }

    #[test]
    fn admin_reject_any_open_state() {
        assert_eq!(admin_reject(RequestStatus::Pending), Ok(RequestStatus::Rejected));
        assert_eq!(
            admin_reject(RequestStatus::PartnerApproved),
            Ok(RequestStatus::Rejected)
        );
        assert_eq!(
            admin_reject(RequestStatus::Approved),
            Err(TransitionError::AlreadyDecided(RequestStatus::Approved))
        );
    }

    /// Full exchange walk-through: A (off Saturday) asks to swap with B, who
    /// wants Tuesday off instead. B accepts, then the admin signs off.
    #[test]
    fn exchange_request_happy_path() {
        let mut status = RequestStatus::Pending;

        // Admin cannot jump the queue while the partner decision is pending.
        assert!(!can_admin_approve(status, true).can_approve);

        status = partner_decision(status, true).unwrap();
        assert_eq!(status, RequestStatus::PartnerApproved);

        status = admin_approve(status, true).unwrap();
        assert_eq!(status, RequestStatus::Approved);
        assert!(status.is_terminal());
    }
}
