//! Trigger detection core: phrase catalog, streaming matcher, and the
//! per-room dedup/debounce ledger.
//!
//! The detection pipeline is: normalize an incoming fragment's text, look
//! it up against the catalog of trigger-phrase variants, emit one
//! [`MatchEvent`](clearance_types::MatchEvent) per matched kind, and let
//! the [`SuppressionLedger`] decide whether the event is a duplicate of
//! one already dispatched for that room. The matcher is pure and
//! stateless; the ledger is the sole shared-mutable-state boundary.

mod catalog;
mod error;
mod ledger;
mod matcher;

pub use catalog::{normalize, PhraseCatalog};
pub use error::{CatalogError, MatchError};
pub use ledger::SuppressionLedger;
pub use matcher::Matcher;
