//! Clearance room watcher service library.
//!
//! Wires the detection core to the HTTP surface: one ingestion endpoint
//! per inbound feed (speech-to-text transcripts and text-stream
//! messages), plus a health check. The room connection itself and the
//! speech-to-text transcription are external collaborators that deliver
//! fragments to these endpoints.

pub mod api;
pub mod config;
pub mod ingest;

use axum::{
    routing::{get, post},
    Router,
};
use clearance_dispatch::DispatchCoordinator;
use clearance_triggers::Matcher;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Stateless fragment scanner.
    pub matcher: Arc<Matcher>,
    /// Dedup ledger + side-effect fan-out.
    pub coordinator: Arc<DispatchCoordinator>,
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/transcripts", post(api::submit_transcript))
        .route("/api/text-streams", post(api::submit_text_stream))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
