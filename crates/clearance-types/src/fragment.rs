//! Incoming text fragments and the match events produced from them.

use crate::trigger::TriggerKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which feed delivered a fragment.
///
/// Both sources are scanned identically; the distinction exists for
/// logging and for the upstream ingestion endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentSource {
    /// An incremental or final chunk from the speech-to-text session.
    Transcript,
    /// A free-text message from a text-stream subscription
    /// (e.g. camera-subsystem descriptions).
    TextStream,
}

impl FragmentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transcript => "transcript",
            Self::TextStream => "text_stream",
        }
    }
}

impl std::fmt::Display for FragmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of incoming text, consumed immediately by the matcher.
///
/// The fragment stream may contain progressively revised partial
/// transcripts for the same utterance (`is_final = false` repeated, then
/// `is_final = true`), so the same spoken phrase can surface in several
/// fragments. Deduplication happens downstream, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingFragment {
    pub room_id: String,
    pub source: FragmentSource,
    pub text: String,
    pub is_final: bool,
    pub received_at: DateTime<Utc>,
}

impl IncomingFragment {
    /// Builds a fragment stamped with the current time.
    pub fn new(
        room_id: impl Into<String>,
        source: FragmentSource,
        text: impl Into<String>,
        is_final: bool,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            source,
            text: text.into(),
            is_final,
            received_at: Utc::now(),
        }
    }
}

/// A trigger detection produced by the matcher for a single fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEvent {
    pub room_id: String,
    pub kind: TriggerKind,
    /// The full (original, un-normalized) fragment text that matched.
    pub matched_text: String,
    pub detected_at: DateTime<Utc>,
}
