//! Reclamation state machine and transition guards.
//!
//! A reclamation is raised against a finished project and assigned to the
//! crew that built it. The assigned crew either accepts it or rejects it
//! with a reason; a rejected reclamation becomes available to every other
//! crew in the firm, and whichever crew picks it up becomes the current
//! crew (a hand-off). `cancel` is an administrative override and is valid
//! from any state except `cancelled` itself.
//!
//! Guards here are pure: the repository layer evaluates crew membership and
//! calls them inside the transaction that applies the transition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// ReclamationStatus
// ---------------------------------------------------------------------------

/// Workflow status of a reclamation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReclamationStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl ReclamationStatus {
    pub const ALL: [ReclamationStatus; 5] = [
        ReclamationStatus::Pending,
        ReclamationStatus::Accepted,
        ReclamationStatus::Rejected,
        ReclamationStatus::Completed,
        ReclamationStatus::Cancelled,
    ];

    /// The snake_case wire name stored in the database and the ledger.
    pub fn as_str(self) -> &'static str {
        match self {
            ReclamationStatus::Pending => "pending",
            ReclamationStatus::Accepted => "accepted",
            ReclamationStatus::Rejected => "rejected",
            ReclamationStatus::Completed => "completed",
            ReclamationStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states admit no further workflow transitions except the
    /// administrative `cancel` of a completed reclamation.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReclamationStatus::Completed | ReclamationStatus::Cancelled
        )
    }
}

impl fmt::Display for ReclamationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReclamationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown reclamation status: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Transition guards
// ---------------------------------------------------------------------------

/// How an accept call applies, once permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptKind {
    /// The assigned crew accepts its own pending reclamation.
    Direct,
    /// A different crew takes over a rejected reclamation; the caller must
    /// repoint `current_crew` at the accepting member's crew.
    HandOff,
}

/// Decides whether a member may accept a reclamation and in which mode.
///
/// `is_current_crew_member` is true when the accepting member belongs to the
/// reclamation's current crew.
pub fn accept_kind(
    status: ReclamationStatus,
    is_current_crew_member: bool,
) -> Result<AcceptKind, CoreError> {
    match (status, is_current_crew_member) {
        (ReclamationStatus::Pending, true) => Ok(AcceptKind::Direct),
        (ReclamationStatus::Pending, false) => Err(CoreError::Validation(
            "Only a member of the assigned crew can accept a pending reclamation".to_string(),
        )),
        (ReclamationStatus::Rejected, false) => Ok(AcceptKind::HandOff),
        (ReclamationStatus::Rejected, true) => Err(CoreError::Conflict(
            "A rejected reclamation can only be taken over by a different crew".to_string(),
        )),
        (status, _) => Err(CoreError::Conflict(format!(
            "Reclamation in status {status} cannot be accepted"
        ))),
    }
}

/// Validates a reject call: pending only, by the assigned crew, with a reason.
pub fn ensure_reject(
    status: ReclamationStatus,
    is_current_crew_member: bool,
    reason: &str,
) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation(
            "A rejection reason is required".to_string(),
        ));
    }
    if status != ReclamationStatus::Pending {
        return Err(CoreError::Conflict(format!(
            "Reclamation in status {status} cannot be rejected"
        )));
    }
    if !is_current_crew_member {
        return Err(CoreError::Validation(
            "Only a member of the assigned crew can reject a reclamation".to_string(),
        ));
    }
    Ok(())
}

/// Validates a complete call: only an accepted reclamation can be completed.
pub fn ensure_complete(status: ReclamationStatus) -> Result<(), CoreError> {
    if status == ReclamationStatus::Accepted {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Reclamation in status {status} cannot be completed"
        )))
    }
}

/// Validates a cancel call. Cancellation is an administrative override and
/// succeeds from every state except `cancelled` itself.
pub fn ensure_cancel(status: ReclamationStatus) -> Result<(), CoreError> {
    if status == ReclamationStatus::Cancelled {
        Err(CoreError::Conflict(
            "Reclamation is already cancelled".to_string(),
        ))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn status_round_trips_through_wire_name() {
        for status in ReclamationStatus::ALL {
            let parsed: ReclamationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "escalated".parse::<ReclamationStatus>().unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn only_completed_and_cancelled_are_terminal() {
        assert!(!ReclamationStatus::Pending.is_terminal());
        assert!(!ReclamationStatus::Accepted.is_terminal());
        assert!(!ReclamationStatus::Rejected.is_terminal());
        assert!(ReclamationStatus::Completed.is_terminal());
        assert!(ReclamationStatus::Cancelled.is_terminal());
    }

    #[test]
    fn assigned_crew_accepts_pending_directly() {
        assert_eq!(
            accept_kind(ReclamationStatus::Pending, true).unwrap(),
            AcceptKind::Direct,
        );
    }

    #[test]
    fn foreign_crew_cannot_accept_pending() {
        let err = accept_kind(ReclamationStatus::Pending, false).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn foreign_crew_takes_over_rejected_as_hand_off() {
        assert_eq!(
            accept_kind(ReclamationStatus::Rejected, false).unwrap(),
            AcceptKind::HandOff,
        );
    }

    #[test]
    fn rejecting_crew_cannot_reclaim_its_own_rejection() {
        let err = accept_kind(ReclamationStatus::Rejected, true).unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[test]
    fn accept_conflicts_outside_pending_and_rejected() {
        for status in [
            ReclamationStatus::Accepted,
            ReclamationStatus::Completed,
            ReclamationStatus::Cancelled,
        ] {
            assert_matches!(accept_kind(status, true), Err(CoreError::Conflict(_)));
            assert_matches!(accept_kind(status, false), Err(CoreError::Conflict(_)));
        }
    }

    #[test]
    fn reject_requires_a_reason() {
        let err = ensure_reject(ReclamationStatus::Pending, true, "  ").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn reject_requires_membership_in_assigned_crew() {
        let err = ensure_reject(ReclamationStatus::Pending, false, "no capacity").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn reject_is_pending_only() {
        assert!(ensure_reject(ReclamationStatus::Pending, true, "no capacity").is_ok());
        for status in [
            ReclamationStatus::Accepted,
            ReclamationStatus::Rejected,
            ReclamationStatus::Completed,
            ReclamationStatus::Cancelled,
        ] {
            assert_matches!(
                ensure_reject(status, true, "no capacity"),
                Err(CoreError::Conflict(_))
            );
        }
    }

    #[test]
    fn complete_requires_accepted() {
        assert!(ensure_complete(ReclamationStatus::Accepted).is_ok());
        for status in [
            ReclamationStatus::Pending,
            ReclamationStatus::Rejected,
            ReclamationStatus::Completed,
            ReclamationStatus::Cancelled,
        ] {
            assert_matches!(ensure_complete(status), Err(CoreError::Conflict(_)));
        }
    }

    #[test]
    fn cancel_succeeds_from_every_state_but_cancelled() {
        for status in [
            ReclamationStatus::Pending,
            ReclamationStatus::Accepted,
            ReclamationStatus::Rejected,
            ReclamationStatus::Completed,
        ] {
            assert!(ensure_cancel(status).is_ok());
        }
        assert_matches!(
            ensure_cancel(ReclamationStatus::Cancelled),
            Err(CoreError::Conflict(_))
        );
    }
}
