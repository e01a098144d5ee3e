//! Outbound call placement through the room infrastructure's SIP trunk.

use crate::error::CallError;
use async_trait::async_trait;
use livekit_api::access_token::{AccessToken, VideoGrants};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

/// Participant name shown for the alert call leg.
const ALERT_PARTICIPANT_NAME: &str = "Shots Fired Alert";

/// Request to place one outbound alert call.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub room_id: String,
    /// The transcript that triggered the call, for the operator log.
    pub transcript: String,
}

/// Result of a placed call.
#[derive(Debug, Clone)]
pub struct CallPlacement {
    /// Identity of the SIP participant created for the call leg.
    pub participant_identity: String,
}

/// Consumed interface to the telephony trunk.
#[async_trait]
pub trait CallInitiator: Send + Sync {
    /// Whether a trunk is configured at all. When this is `false` the
    /// coordinator skips the call instead of erroring.
    fn is_configured(&self) -> bool;

    /// Places the outbound call.
    async fn initiate(&self, request: &CallRequest) -> Result<CallPlacement, CallError>;
}

/// Operator-set telephony configuration.
#[derive(Debug, Clone)]
pub struct SipCallConfig {
    /// SIP trunk to dial out from. Absent means call dispatch is disabled.
    pub trunk_id: Option<String>,
    /// Room the alert call leg joins.
    pub alert_room: String,
    /// Fixed destination number, operator-set, never derived at runtime.
    pub phone_number: String,
}

/// Production call initiator: creates a SIP participant on the LiveKit
/// trunk via the `CreateSIPParticipant` service endpoint, authenticated
/// with a freshly minted access token.
pub struct LiveKitCallInitiator {
    http_url: String,
    api_key: String,
    api_secret: String,
    config: SipCallConfig,
    client: reqwest::Client,
}

impl LiveKitCallInitiator {
    pub fn new(
        livekit_url: &str,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        config: SipCallConfig,
        timeout: Duration,
    ) -> Result<Self, CallError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_url: service_http_url(livekit_url),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            config,
            client,
        })
    }

    fn mint_token(&self, identity: &str) -> Result<String, CallError> {
        let token = AccessToken::with_api_key(&self.api_key, &self.api_secret)
            .with_identity(identity)
            .with_name(ALERT_PARTICIPANT_NAME)
            .with_grants(VideoGrants {
                room_create: true,
                room_admin: true,
                room_join: true,
                room: self.config.alert_room.clone(),
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(600));
        Ok(token.to_jwt()?)
    }
}

impl std::fmt::Debug for LiveKitCallInitiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveKitCallInitiator")
            .field("http_url", &self.http_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl CallInitiator for LiveKitCallInitiator {
    fn is_configured(&self) -> bool {
        self.config
            .trunk_id
            .as_deref()
            .is_some_and(|trunk| !trunk.is_empty())
    }

    async fn initiate(&self, request: &CallRequest) -> Result<CallPlacement, CallError> {
        let trunk_id = self
            .config
            .trunk_id
            .as_deref()
            .filter(|trunk| !trunk.is_empty())
            .ok_or(CallError::TrunkNotConfigured)?;

        let participant_identity = format!("sip-alert-{}", Uuid::new_v4());
        let token = self.mint_token(&participant_identity)?;

        let url = format!("{}/twirp/livekit.SIP/CreateSIPParticipant", self.http_url);
        let body = json!({
            "sipTrunkId": trunk_id,
            "sipCallTo": self.config.phone_number,
            "roomName": self.config.alert_room,
            "participantIdentity": participant_identity,
            "participantName": ALERT_PARTICIPANT_NAME,
            "krispEnabled": true,
            "waitUntilAnswered": false,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CallError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::warn!(
            phone = %self.config.phone_number,
            room = %self.config.alert_room,
            participant = %participant_identity,
            trigger_room = %request.room_id,
            transcript = %request.transcript,
            "outbound call dispatched"
        );

        Ok(CallPlacement {
            participant_identity,
        })
    }
}

/// Maps a LiveKit `ws(s)://` URL to the `http(s)://` base used by the
/// Twirp service endpoints. Plain `http(s)://` URLs pass through.
fn service_http_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if let Some(rest) = trimmed.strip_prefix("wss://") {
        format!("https://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("ws://") {
        format!("http://{rest}")
    } else {
        trimmed.to_string()
    }
}
