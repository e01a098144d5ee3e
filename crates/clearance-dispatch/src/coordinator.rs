//! Fan-out coordinator for admitted triggers.

use crate::call::{CallInitiator, CallRequest};
use crate::publisher::{EventPublisher, IncidentRecord};
use clearance_triggers::SuppressionLedger;
use clearance_types::{
    CallOutcome, DispatchDisposition, DispatchOutcome, MatchEvent, PublishOutcome, TriggerKind,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on each side-effect call. A hung external API must not
/// stall trigger processing for the room.
pub const DEFAULT_SIDE_EFFECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Coordinates the event publish and the conditional outbound call for
/// each match event that survives the suppression ledger.
///
/// The two side effects run concurrently and independently; neither
/// result affects the other's input, and neither failure blocks the
/// other. Errors are classified, logged, and recorded in the returned
/// outcome — nothing propagates past [`handle`](Self::handle).
pub struct DispatchCoordinator {
    ledger: SuppressionLedger,
    publisher: Arc<dyn EventPublisher>,
    call_initiator: Arc<dyn CallInitiator>,
    side_effect_timeout: Duration,
}

impl DispatchCoordinator {
    pub fn new(
        ledger: SuppressionLedger,
        publisher: Arc<dyn EventPublisher>,
        call_initiator: Arc<dyn CallInitiator>,
    ) -> Self {
        Self {
            ledger,
            publisher,
            call_initiator,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_side_effect_timeout(mut self, timeout: Duration) -> Self {
        self.side_effect_timeout = timeout;
        self
    }

    /// Whether this kind escalates to an outbound call.
    fn call_required(kind: TriggerKind) -> bool {
        matches!(kind, TriggerKind::ShotsFired)
    }

    /// Admits the event through the ledger and, if admitted, attempts
    /// both side effects. Completion of both is awaited before returning.
    pub async fn handle(&self, event: &MatchEvent) -> DispatchDisposition {
        if !self.ledger.admit(event) {
            debug!(
                room = %event.room_id,
                kind = %event.kind,
                "trigger suppressed by dedup ledger"
            );
            return DispatchDisposition::Suppressed;
        }

        let (publish, call) = tokio::join!(self.publish(event), self.place_call(event));

        DispatchDisposition::Dispatched(DispatchOutcome {
            room_id: event.room_id.clone(),
            kind: event.kind,
            publish,
            call,
        })
    }

    async fn publish(&self, event: &MatchEvent) -> PublishOutcome {
        let record = IncidentRecord::from_event(event);
        match tokio::time::timeout(self.side_effect_timeout, self.publisher.publish(&record)).await
        {
            Ok(Ok(())) => PublishOutcome::Delivered,
            Ok(Err(e)) => {
                warn!(
                    room = %event.room_id,
                    kind = %event.kind,
                    "event publish failed: {e}"
                );
                PublishOutcome::Failed(e.to_string())
            }
            Err(_) => {
                warn!(
                    room = %event.room_id,
                    kind = %event.kind,
                    timeout_secs = self.side_effect_timeout.as_secs(),
                    "event publish timed out"
                );
                PublishOutcome::Failed(format!(
                    "timed out after {}s",
                    self.side_effect_timeout.as_secs()
                ))
            }
        }
    }

    async fn place_call(&self, event: &MatchEvent) -> CallOutcome {
        if !Self::call_required(event.kind) {
            return CallOutcome::Skipped("trigger does not escalate to a call".to_string());
        }
        if !self.call_initiator.is_configured() {
            warn!(
                room = %event.room_id,
                kind = %event.kind,
                "no telephony trunk configured, skipping outbound call"
            );
            return CallOutcome::Skipped("no telephony trunk configured".to_string());
        }

        let request = CallRequest {
            room_id: event.room_id.clone(),
            transcript: event.matched_text.clone(),
        };
        match tokio::time::timeout(
            self.side_effect_timeout,
            self.call_initiator.initiate(&request),
        )
        .await
        {
            Ok(Ok(placement)) => CallOutcome::Placed(placement.participant_identity),
            Ok(Err(e)) => {
                warn!(
                    room = %event.room_id,
                    kind = %event.kind,
                    "outbound call failed: {e}"
                );
                CallOutcome::Failed(e.to_string())
            }
            Err(_) => {
                warn!(
                    room = %event.room_id,
                    kind = %event.kind,
                    timeout_secs = self.side_effect_timeout.as_secs(),
                    "outbound call timed out"
                );
                CallOutcome::Failed(format!(
                    "timed out after {}s",
                    self.side_effect_timeout.as_secs()
                ))
            }
        }
    }
}
