//! Event publishing to the external incident-tracking API.

use crate::error::PublishError;
use async_trait::async_trait;
use clearance_types::MatchEvent;
use serde::Serialize;
use std::time::Duration;

/// Fixed producer tag included with every published event.
const EVENT_SOURCE: &str = "clearance-room-watcher";

/// The event record posted to the incident API.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentRecord {
    pub room: String,
    pub transcript: String,
    pub trigger: String,
    /// RFC 3339 timestamp of the detection.
    pub detected_at: String,
    pub source: &'static str,
}

impl IncidentRecord {
    pub fn from_event(event: &MatchEvent) -> Self {
        Self {
            room: event.room_id.clone(),
            transcript: event.matched_text.clone(),
            trigger: event.kind.as_str().to_string(),
            detected_at: event.detected_at.to_rfc3339(),
            source: EVENT_SOURCE,
        }
    }
}

/// Consumed interface to the incident API.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Posts one event record. Success is any 2xx response.
    async fn publish(&self, record: &IncidentRecord) -> Result<(), PublishError>;
}

/// Production publisher: `POST {base_url}/api/events` as JSON.
///
/// Never retries; a failed publish is classified and surfaced to the
/// coordinator, which records it without blocking the call side effect.
#[derive(Debug, Clone)]
pub struct HttpEventPublisher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEventPublisher {
    /// Builds a publisher for the given incident API base URL with a
    /// per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/events", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EventPublisher for HttpEventPublisher {
    async fn publish(&self, record: &IncidentRecord) -> Result<(), PublishError> {
        let response = self.client.post(&self.endpoint).json(record).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            room = %record.room,
            trigger = %record.trigger,
            status = status.as_u16(),
            "incident event published"
        );
        Ok(())
    }
}
