//! Concurrency tests for the suppression ledger.
//!
//! These tests verify the ledger is correct under concurrent access:
//! - Many tasks racing to admit the same `(room, kind)` key
//! - Many distinct keys admitted concurrently
//! - No panics or deadlocks under high volume

use chrono::Utc;
use clearance_triggers::SuppressionLedger;
use clearance_types::{MatchEvent, TriggerKind};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

fn event(room: &str, kind: TriggerKind) -> MatchEvent {
    MatchEvent {
        room_id: room.to_string(),
        kind,
        matched_text: "shots fired".to_string(),
        detected_at: Utc::now(),
    }
}

#[tokio::test]
async fn concurrent_admits_for_same_key_yield_exactly_one_admission() {
    let ledger = Arc::new(SuppressionLedger::session_lifetime());
    let admitted = Arc::new(AtomicU32::new(0));

    let mut handles = Vec::new();
    // 200 concurrent tasks all reporting the same trigger in the same room
    for _ in 0..200 {
        let ledger = ledger.clone();
        let admitted = admitted.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            if ledger.admit(&event("room-1", TriggerKind::ShotsFired)) {
                admitted.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    for handle in handles {
        handle.await.expect("task should not panic");
    }

    assert_eq!(
        admitted.load(Ordering::Relaxed),
        1,
        "exactly one of the racing admits should win"
    );
    assert_eq!(ledger.tracked_keys(), 1);
}

#[tokio::test]
async fn concurrent_admits_for_distinct_keys_all_succeed() {
    let ledger = Arc::new(SuppressionLedger::session_lifetime());

    let mut handles = Vec::new();
    // 50 distinct rooms, each reporting two distinct kinds concurrently
    for room_idx in 0..50u32 {
        for kind in [TriggerKind::ShotsFired, TriggerKind::CameraBlocked] {
            let ledger = ledger.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                ledger.admit(&event(&format!("room-{room_idx}"), kind))
            }));
        }
    }

    let mut admitted = 0usize;
    for handle in handles {
        if handle.await.expect("task should not panic") {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 100, "every distinct (room, kind) should be admitted");
    assert_eq!(ledger.tracked_keys(), 100);
}

#[tokio::test]
async fn high_volume_admits_do_not_panic() {
    // Stress test: 1000 concurrent admits over 10 rooms and 2 kinds.
    // The primary assertion is that no panics or deadlocks occur, and the
    // per-key at-most-one invariant holds.
    let ledger = Arc::new(SuppressionLedger::session_lifetime());
    let admitted = Arc::new(AtomicU32::new(0));

    let mut handles = Vec::new();
    for i in 0..1000u32 {
        let ledger = ledger.clone();
        let admitted = admitted.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let kind = if i % 2 == 0 {
                TriggerKind::ShotsFired
            } else {
                TriggerKind::ManDown
            };
            if ledger.admit(&event(&format!("room-{}", i % 10), kind)) {
                admitted.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    for handle in handles {
        handle.await.expect("ledger should not panic under high concurrency");
    }

    // 10 rooms * 2 kinds = 20 distinct keys, one admission each
    assert_eq!(admitted.load(Ordering::Relaxed), 20);
    assert_eq!(ledger.tracked_keys(), 20);
}
