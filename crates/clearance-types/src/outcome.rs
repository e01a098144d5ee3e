//! Outcomes of a single dispatch coordinator invocation.
//!
//! These are ephemeral values used for logging and testing; nothing
//! persists them.

use crate::trigger::TriggerKind;
use serde::Serialize;

/// Result of the incident-event publish side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum PublishOutcome {
    /// The incident API accepted the event (2xx).
    Delivered,
    /// Transport error, non-2xx response, or timeout.
    Failed(String),
}

/// Result of the conditional outbound-call side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum CallOutcome {
    /// The call was placed; carries the SIP participant identity.
    Placed(String),
    /// The call was intentionally not attempted (non-qualifying kind, or
    /// no telephony trunk configured).
    Skipped(String),
    /// The call was attempted and failed or timed out.
    Failed(String),
}

/// Aggregated result of one admitted dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub room_id: String,
    pub kind: TriggerKind,
    pub publish: PublishOutcome,
    pub call: CallOutcome,
}

/// Terminal state of one trigger handed to the coordinator.
#[derive(Debug, Clone)]
pub enum DispatchDisposition {
    /// The ledger refused the event; no side effects ran.
    Suppressed,
    /// The event was admitted and both side effects were attempted.
    Dispatched(DispatchOutcome),
}

impl DispatchDisposition {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }

    /// Returns the outcome for an admitted dispatch, if any.
    pub fn outcome(&self) -> Option<&DispatchOutcome> {
        match self {
            Self::Suppressed => None,
            Self::Dispatched(outcome) => Some(outcome),
        }
    }
}
