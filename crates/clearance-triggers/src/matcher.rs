//! Stateless fragment scanner.

use crate::catalog::{normalize, PhraseCatalog};
use crate::error::MatchError;
use clearance_types::{IncomingFragment, MatchEvent};
use tracing::debug;

/// Scans incoming fragments against the phrase catalog.
///
/// The matcher keeps no history: partial-transcript revisions of the same
/// utterance legitimately re-emit the same kind across fragments, and the
/// suppression ledger downstream is what keeps that from turning into
/// duplicate dispatches. Transcript and text-stream fragments are scanned
/// identically.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    catalog: PhraseCatalog,
}

impl Matcher {
    pub fn new(catalog: PhraseCatalog) -> Self {
        Self { catalog }
    }

    /// Scans one fragment, returning a match event per trigger kind found
    /// in its text.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyFragment`] if the fragment text is empty
    /// after trimming. Callers skip the fragment and continue the stream.
    pub fn scan(&self, fragment: &IncomingFragment) -> Result<Vec<MatchEvent>, MatchError> {
        if fragment.text.trim().is_empty() {
            return Err(MatchError::EmptyFragment {
                room_id: fragment.room_id.clone(),
            });
        }

        let normalized = normalize(&fragment.text);
        let kinds = self.catalog.lookup(&normalized);
        if !kinds.is_empty() {
            debug!(
                room = %fragment.room_id,
                source = %fragment.source,
                is_final = fragment.is_final,
                matches = kinds.len(),
                "fragment matched trigger phrases"
            );
        }

        Ok(kinds
            .into_iter()
            .map(|kind| MatchEvent {
                room_id: fragment.room_id.clone(),
                kind,
                matched_text: fragment.text.clone(),
                detected_at: fragment.received_at,
            })
            .collect())
    }
}
