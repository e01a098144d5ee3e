//! Fragment ingestion: scan, admit, dispatch.
//!
//! This is the single-threaded-per-fragment consumer path: each fragment
//! is scanned by the matcher, every match event is handed to the
//! coordinator, and all errors are contained here — one bad fragment or
//! one failed dispatch never halts processing of subsequent fragments.

use crate::AppState;
use clearance_types::{DispatchDisposition, IncomingFragment};
use serde::Serialize;
use tracing::{info, warn};

/// Summary of what one fragment produced, returned to the feed caller
/// and used in tests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FragmentReport {
    /// Trigger kinds matched in the fragment.
    pub matches: usize,
    /// Matches admitted by the ledger and dispatched.
    pub dispatched: usize,
    /// Matches suppressed as duplicates.
    pub suppressed: usize,
    /// Whether the fragment was skipped as malformed.
    pub skipped: bool,
}

/// Runs one fragment through the scan → admit → dispatch pipeline.
pub async fn process_fragment(state: &AppState, fragment: IncomingFragment) -> FragmentReport {
    info!(
        room = %fragment.room_id,
        source = %fragment.source,
        is_final = fragment.is_final,
        "fragment received"
    );

    let events = match state.matcher.scan(&fragment) {
        Ok(events) => events,
        Err(e) => {
            warn!(source = %fragment.source, "skipping fragment: {e}");
            return FragmentReport {
                skipped: true,
                ..Default::default()
            };
        }
    };

    let mut report = FragmentReport {
        matches: events.len(),
        ..Default::default()
    };

    for event in &events {
        match state.coordinator.handle(event).await {
            DispatchDisposition::Suppressed => report.suppressed += 1,
            DispatchDisposition::Dispatched(outcome) => {
                info!(
                    room = %outcome.room_id,
                    kind = %outcome.kind,
                    severity = ?outcome.kind.severity(),
                    publish = ?outcome.publish,
                    call = ?outcome.call,
                    "trigger dispatched"
                );
                report.dispatched += 1;
            }
        }
    }

    report
}
