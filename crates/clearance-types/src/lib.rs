//! Domain types for the Clearance room watcher.
//!
//! These types flow between the detection core (`clearance-triggers`), the
//! side-effect dispatcher (`clearance-dispatch`), and the watcher service.
//! All cross-component communication is by value copy of immutable data:
//! nothing here holds a shared-mutable or cyclic reference.

mod fragment;
mod outcome;
mod trigger;

pub use fragment::{FragmentSource, IncomingFragment, MatchEvent};
pub use outcome::{CallOutcome, DispatchDisposition, DispatchOutcome, PublishOutcome};
pub use trigger::{ParseTriggerKindError, Severity, TriggerKind};
