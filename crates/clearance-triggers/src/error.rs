//! Error types for the trigger detection core.

use clearance_types::TriggerKind;

/// Errors raised when building a phrase catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A phrase variant normalized to the empty string.
    #[error("phrase variant for {kind} is empty after normalization")]
    EmptyVariant { kind: TriggerKind },

    /// The same normalized variant was registered more than once.
    #[error("duplicate phrase variant {variant:?} ({first} and {second})")]
    DuplicateVariant {
        variant: String,
        first: TriggerKind,
        second: TriggerKind,
    },

    /// A variant of one kind contains a variant of another kind, so a
    /// single text could never match one without the other.
    #[error("ambiguous phrase variants: {outer:?} ({outer_kind}) contains {inner:?} ({inner_kind})")]
    AmbiguousVariant {
        outer: String,
        outer_kind: TriggerKind,
        inner: String,
        inner_kind: TriggerKind,
    },
}

/// Errors raised while scanning a fragment.
///
/// A match error never halts the stream: callers log it, skip the
/// fragment, and continue with the next one.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The fragment carried no scannable text.
    #[error("fragment from room {room_id} contains no scannable text")]
    EmptyFragment { room_id: String },
}
