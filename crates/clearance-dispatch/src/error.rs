//! Error types for the two dispatch side effects.
//!
//! Both error kinds are contained inside the coordinator: they are logged
//! and recorded in the dispatch outcome, never raised to the ingestion
//! loop.

use thiserror::Error;

/// The incident API was unreachable or rejected the event.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Transport-level failure (connect, TLS, request timeout).
    #[error("incident API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The incident API answered with a non-2xx status.
    #[error("incident API rejected event ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// The outbound call could not be placed.
#[derive(Debug, Error)]
pub enum CallError {
    /// No telephony trunk is configured. Callers that check
    /// [`CallInitiator::is_configured`](crate::CallInitiator::is_configured)
    /// first will skip the call instead of hitting this.
    #[error("no telephony trunk configured for outbound calls")]
    TrunkNotConfigured,

    /// Minting the room-service access token failed.
    #[error("access token error: {0}")]
    Token(#[from] livekit_api::access_token::AccessTokenError),

    /// Transport-level failure talking to the room infrastructure.
    #[error("SIP participant request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The room infrastructure refused to place the call.
    #[error("SIP participant request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}
