//! Per-room, per-kind dedup/debounce ledger.

use clearance_types::{MatchEvent, TriggerKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Tracks which `(room, kind)` pairs have already been dispatched and
/// suppresses repeats within the configured window.
///
/// `admit` is a single atomic check-and-set per key: the timestamp is
/// recorded under the same lock acquisition that performs the check, so
/// two fragments racing to report the same trigger kind in the same room
/// result in exactly one admission.
///
/// Entries are never removed; the map is naturally bounded by the small
/// trigger-kind cardinality times the number of active rooms.
#[derive(Debug, Clone)]
pub struct SuppressionLedger {
    entries: Arc<Mutex<HashMap<(String, TriggerKind), Instant>>>,
    /// `None` suppresses repeats for the session lifetime; `Some(w)`
    /// re-arms a kind once `w` has elapsed since the last admission.
    window: Option<Duration>,
}

impl SuppressionLedger {
    pub fn new(window: Option<Duration>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            window,
        }
    }

    /// Suppresses for the lifetime of the process — a repeated trigger in
    /// the same room never re-dispatches.
    pub fn session_lifetime() -> Self {
        Self::new(None)
    }

    /// Returns `true` if the caller should dispatch this event, recording
    /// the admission before returning. Returns `false` to suppress.
    pub fn admit(&self, event: &MatchEvent) -> bool {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                // Lock poisoned by a panicked thread. Recover with the
                // poisoned guard — the worst case is a stale timestamp,
                // and refusing every trigger would silence the watcher.
                tracing::error!("suppression ledger lock poisoned, recovering with stale state");
                poisoned.into_inner()
            }
        };

        let key = (event.room_id.clone(), event.kind);
        let now = Instant::now();
        match entries.get(&key) {
            Some(last) => match self.window {
                Some(window) if now.duration_since(*last) >= window => {
                    entries.insert(key, now);
                    true
                }
                _ => false,
            },
            None => {
                entries.insert(key, now);
                true
            }
        }
    }

    /// Number of `(room, kind)` pairs that have been admitted at least once.
    pub fn tracked_keys(&self) -> usize {
        match self.entries.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl Default for SuppressionLedger {
    fn default() -> Self {
        Self::session_lifetime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(room: &str, kind: TriggerKind) -> MatchEvent {
        MatchEvent {
            room_id: room.to_string(),
            kind,
            matched_text: "shots fired".to_string(),
            detected_at: Utc::now(),
        }
    }

    #[test]
    fn first_admission_succeeds_repeat_is_suppressed() {
        let ledger = SuppressionLedger::session_lifetime();
        let ev = event("room-1", TriggerKind::ShotsFired);
        assert!(ledger.admit(&ev));
        assert!(!ledger.admit(&ev));
        assert!(!ledger.admit(&ev));
    }

    #[test]
    fn distinct_kinds_are_tracked_independently() {
        let ledger = SuppressionLedger::session_lifetime();
        assert!(ledger.admit(&event("room-1", TriggerKind::ShotsFired)));
        assert!(ledger.admit(&event("room-1", TriggerKind::ManDown)));
        assert!(!ledger.admit(&event("room-1", TriggerKind::ShotsFired)));
        assert_eq!(ledger.tracked_keys(), 2);
    }

    #[test]
    fn distinct_rooms_are_tracked_independently() {
        let ledger = SuppressionLedger::session_lifetime();
        assert!(ledger.admit(&event("room-1", TriggerKind::ShotsFired)));
        assert!(ledger.admit(&event("room-2", TriggerKind::ShotsFired)));
        assert!(!ledger.admit(&event("room-2", TriggerKind::ShotsFired)));
    }

    #[test]
    fn window_re_arms_after_elapse() {
        let ledger = SuppressionLedger::new(Some(Duration::from_millis(20)));
        let ev = event("room-1", TriggerKind::OfficerDown);
        assert!(ledger.admit(&ev));
        assert!(!ledger.admit(&ev));
        std::thread::sleep(Duration::from_millis(30));
        assert!(ledger.admit(&ev));
        assert!(!ledger.admit(&ev));
    }

    #[test]
    fn session_lifetime_never_re_arms() {
        let ledger = SuppressionLedger::session_lifetime();
        let ev = event("room-1", TriggerKind::CameraBlocked);
        assert!(ledger.admit(&ev));
        std::thread::sleep(Duration::from_millis(10));
        assert!(!ledger.admit(&ev));
    }
}
