//! HTTP handlers for the watcher's ingestion and health endpoints.

use crate::ingest::{process_fragment, FragmentReport};
use crate::AppState;
use axum::{extract::State, Json};
use clearance_types::{FragmentSource, IncomingFragment};
use serde::Deserialize;
use serde_json::{json, Value};

/// Default text-stream topic, matching the camera-subsystem publisher.
fn default_topic() -> String {
    "video.description".to_string()
}

/// One transcript chunk from the speech-to-text session.
#[derive(Debug, Deserialize)]
pub struct TranscriptSubmission {
    pub room: String,
    pub text: String,
    #[serde(default)]
    pub is_final: bool,
}

/// One message from a text-stream subscription.
#[derive(Debug, Deserialize)]
pub struct TextStreamSubmission {
    pub room: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    pub text: String,
}

/// Health check handler.
///
/// Returns `200 OK` with service status and version. Used by load
/// balancers, monitoring, and CI to verify the watcher is running.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ingestion entry point for the transcript feed.
///
/// Partial and final chunks are both scanned; repeats across transcript
/// revisions are handled by the suppression ledger downstream.
pub async fn submit_transcript(
    State(state): State<AppState>,
    Json(submission): Json<TranscriptSubmission>,
) -> Json<FragmentReport> {
    let fragment = IncomingFragment::new(
        submission.room,
        FragmentSource::Transcript,
        submission.text,
        submission.is_final,
    );
    Json(process_fragment(&state, fragment).await)
}

/// Ingestion entry point for the text-stream feed.
pub async fn submit_text_stream(
    State(state): State<AppState>,
    Json(submission): Json<TextStreamSubmission>,
) -> Json<FragmentReport> {
    tracing::debug!(room = %submission.room, topic = %submission.topic, "text stream message");
    let fragment = IncomingFragment::new(
        submission.room,
        FragmentSource::TextStream,
        submission.text,
        // Text-stream messages are complete by construction.
        true,
    );
    Json(process_fragment(&state, fragment).await)
}
