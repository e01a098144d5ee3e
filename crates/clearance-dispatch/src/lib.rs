//! Side-effect dispatch for admitted triggers.
//!
//! Given a confirmed, non-duplicate [`MatchEvent`](clearance_types::MatchEvent),
//! the [`DispatchCoordinator`] fans out to two external collaborators: the
//! incident API (always) and the telephony trunk (only for the most severe
//! trigger). The two side effects run concurrently, are individually
//! time-bounded, and are isolated from each other: a telephony failure
//! never suppresses the incident record, and an incident-API outage never
//! suppresses the emergency call. Nothing in this crate retries; retry
//! policy, if any, belongs to the collaborators behind the traits.

mod call;
mod coordinator;
mod error;
mod publisher;

pub use call::{CallInitiator, CallPlacement, CallRequest, LiveKitCallInitiator, SipCallConfig};
pub use coordinator::DispatchCoordinator;
pub use error::{CallError, PublishError};
pub use publisher::{EventPublisher, HttpEventPublisher, IncidentRecord};
