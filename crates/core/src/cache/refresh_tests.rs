use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::cache::{refresh_partition, RefreshGate, RefreshOutcome};
use crate::errors::{Error, Result};
use crate::sync::{SyncMetadata, SyncTrackerTrait};

#[derive(Default)]
struct InMemorySyncTracker {
    entries: Mutex<HashMap<String, SyncMetadata>>,
}

#[async_trait]
impl SyncTrackerTrait for InMemorySyncTracker {
    async fn record_sync(&self, key: &str, synced_at: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(existing) if existing.synced_at > synced_at => Ok(existing.synced_at),
            _ => {
                entries.insert(key.to_string(), SyncMetadata::new(key, synced_at));
                Ok(synced_at)
            }
        }
    }

    async fn record_sync_with_value(
        &self,
        key: &str,
        synced_at: DateTime<Utc>,
        _value: &str,
    ) -> Result<DateTime<Utc>> {
        self.record_sync(key, synced_at).await
    }

    fn last_sync(&self, key: &str) -> Result<Option<SyncMetadata>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.contains(user_id));
        Ok(before - entries.len())
    }
}

#[tokio::test]
async fn test_successful_refresh_commits_and_records_sync() {
    let gate = RefreshGate::new();
    let tracker = InMemorySyncTracker::default();
    let committed: Arc<Mutex<Vec<i32>>> = Arc::new(Mutex::new(Vec::new()));

    let committed_clone = committed.clone();
    let outcome = refresh_partition(
        &gate,
        &tracker,
        "positions:1:bybit:demo",
        || async { Ok(vec![1, 2, 3]) },
        move |rows| async move {
            *committed_clone.lock().unwrap() = rows;
            Ok(())
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome, RefreshOutcome::Refreshed { rows: 3 });
    assert_eq!(*committed.lock().unwrap(), vec![1, 2, 3]);
    assert!(tracker
        .last_sync("positions:1:bybit:demo")
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_failed_fetch_skips_commit_and_sync() {
    let gate = RefreshGate::new();
    let tracker = InMemorySyncTracker::default();
    let commit_ran = Arc::new(AtomicBool::new(false));

    let commit_ran_clone = commit_ran.clone();
    let result = refresh_partition::<i32, _, _>(
        &gate,
        &tracker,
        "positions:1:bybit:demo",
        || async { Err(Error::FetchFailed("connection reset".into())) },
        move |_rows| async move {
            commit_ran_clone.store(true, Ordering::SeqCst);
            Ok(())
        },
    )
    .await;

    assert!(matches!(result, Err(Error::FetchFailed(_))));
    assert!(!commit_ran.load(Ordering::SeqCst));
    assert!(tracker
        .last_sync("positions:1:bybit:demo")
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_empty_fetch_still_commits() {
    let gate = RefreshGate::new();
    let tracker = InMemorySyncTracker::default();
    let commit_ran = Arc::new(AtomicBool::new(false));

    let commit_ran_clone = commit_ran.clone();
    let outcome = refresh_partition::<i32, _, _>(
        &gate,
        &tracker,
        "positions:1:bybit:demo",
        || async { Ok(Vec::new()) },
        move |rows| async move {
            assert!(rows.is_empty());
            commit_ran_clone.store(true, Ordering::SeqCst);
            Ok(())
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome, RefreshOutcome::Refreshed { rows: 0 });
    assert!(commit_ran.load(Ordering::SeqCst));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refreshes_same_key_are_serialized() {
    let gate = Arc::new(RefreshGate::new());
    let tracker = Arc::new(InMemorySyncTracker::default());
    let in_flight = Arc::new(AtomicUsize::new(0));
    let overlapped = Arc::new(AtomicBool::new(false));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let gate = gate.clone();
        let tracker = tracker.clone();
        let in_flight = in_flight.clone();
        let overlapped = overlapped.clone();
        handles.push(tokio::spawn(async move {
            let in_flight_fetch = in_flight.clone();
            let overlapped_fetch = overlapped.clone();
            refresh_partition(
                gate.as_ref(),
                tracker.as_ref(),
                "orders:1:bybit:demo",
                move || async move {
                    if in_flight_fetch.fetch_add(1, Ordering::SeqCst) > 0 {
                        overlapped_fetch.store(true, Ordering::SeqCst);
                    }
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight_fetch.fetch_sub(1, Ordering::SeqCst);
                    Ok(vec![1])
                },
                |_rows| async { Ok(()) },
            )
            .await
        }));
    }

    let mut refreshed = 0;
    let mut coalesced = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            RefreshOutcome::Refreshed { .. } => refreshed += 1,
            RefreshOutcome::Coalesced => coalesced += 1,
        }
    }

    assert!(!overlapped.load(Ordering::SeqCst), "fetches overlapped");
    assert_eq!(refreshed + coalesced, 4);
    // The first refresh does the work; latecomers that started before its
    // commit coalesce into it.
    assert!(refreshed >= 1);
}

#[tokio::test]
async fn test_different_keys_do_not_block_each_other() {
    let gate = RefreshGate::new();
    let tracker = InMemorySyncTracker::default();

    let outcome_demo = refresh_partition(
        &gate,
        &tracker,
        "positions:1:bybit:demo",
        || async { Ok(vec![1]) },
        |_rows| async { Ok(()) },
    )
    .await
    .unwrap();
    let outcome_real = refresh_partition(
        &gate,
        &tracker,
        "positions:1:bybit:real",
        || async { Ok(vec![2]) },
        |_rows| async { Ok(()) },
    )
    .await
    .unwrap();

    assert_eq!(outcome_demo, RefreshOutcome::Refreshed { rows: 1 });
    assert_eq!(outcome_real, RefreshOutcome::Refreshed { rows: 1 });
}
