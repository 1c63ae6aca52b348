//! Serialized refresh-and-replace coordination.
//!
//! Every entity kind's refresh path runs through [`refresh_partition`]: the
//! remote fetch happens outside the store, and only a fully successful fetch
//! reaches the storage layer's transactional replace-all. A failed fetch
//! leaves the previous snapshot authoritative.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use log::debug;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::errors::Result;
use crate::sync::SyncTrackerTrait;

/// Per-sync-key mutex map serializing refresh-and-replace operations.
///
/// Two refreshes for the same `(kind, partition)` never run concurrently;
/// refreshes for different keys proceed independently. Entries are created
/// lazily and kept for the process lifetime (the key space is small: kinds x
/// active partitions).
#[derive(Default)]
pub struct RefreshGate {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

/// Outcome of a refresh attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetch ran and the partition's rows were replaced.
    Refreshed { rows: usize },
    /// Another refresh for the same key committed while this one was waiting
    /// on the gate; the fetch was skipped and that result stands.
    Coalesced,
}

/// Runs one refresh-and-replace for a sync key, strictly serialized against
/// concurrent refreshes of the same key.
///
/// Steps, in order:
/// 1. Acquire the per-key gate.
/// 2. Coalesce: if a refresh committed after this attempt started, return
///    [`RefreshOutcome::Coalesced`] without refetching.
/// 3. Run `fetch`. Errors propagate (as `Error::FetchFailed` from the remote
///    boundary) and the cached rows are left untouched. Cancellation by
///    dropping the returned future is safe up to this point; nothing has been
///    written.
/// 4. Run `commit` with the fetched rows. The storage implementation executes
///    delete-partition + insert-all as one transaction; an empty `rows` set
///    still commits so that stale rows are cleared.
/// 5. Record the sync timestamp for the key.
pub async fn refresh_partition<T, FetchFut, CommitFut>(
    gate: &RefreshGate,
    tracker: &dyn SyncTrackerTrait,
    key: &str,
    fetch: impl FnOnce() -> FetchFut,
    commit: impl FnOnce(Vec<T>) -> CommitFut,
) -> Result<RefreshOutcome>
where
    FetchFut: Future<Output = Result<Vec<T>>>,
    CommitFut: Future<Output = Result<()>>,
{
    let started = Utc::now();
    let _guard = gate.lock(key).await;

    if let Some(meta) = tracker.last_sync(key)? {
        if meta.synced_at >= started {
            debug!("refresh for {} coalesced into a just-completed one", key);
            return Ok(RefreshOutcome::Coalesced);
        }
    }

    let rows = fetch().await?;
    let count = rows.len();
    commit(rows).await?;
    tracker.record_sync(key, Utc::now()).await?;

    debug!("refreshed {} ({} rows)", key, count);
    Ok(RefreshOutcome::Refreshed { rows: count })
}
