//! Repository trait for sync metadata.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::sync::SyncMetadata;

/// Tracks per-key last-successful-sync timestamps.
///
/// The per-key state machine is `Never synced -> Synced(t)` and monotonic:
/// a `record_sync` carrying a timestamp older than the stored one is silently
/// ignored (debug log only), which protects against out-of-order completion
/// of concurrent refresh attempts.
#[async_trait]
pub trait SyncTrackerTrait: Send + Sync {
    /// Record a successful sync at `synced_at`. Returns the timestamp now
    /// stored for the key, which is `synced_at` unless the write was stale.
    async fn record_sync(&self, key: &str, synced_at: DateTime<Utc>) -> Result<DateTime<Utc>>;

    /// Record a successful sync together with an opaque incremental
    /// checkpoint (e.g., the newest trade timestamp seen).
    async fn record_sync_with_value(
        &self,
        key: &str,
        synced_at: DateTime<Utc>,
        value: &str,
    ) -> Result<DateTime<Utc>>;

    /// Last successful sync for the key, or `None` if never synced.
    fn last_sync(&self, key: &str) -> Result<Option<SyncMetadata>>;

    /// Whether the key was synced within `max_age` of `now`.
    fn is_fresh(&self, key: &str, now: DateTime<Utc>, max_age: std::time::Duration) -> Result<bool> {
        Ok(self
            .last_sync(key)?
            .map(|meta| meta.is_fresh(now, max_age))
            .unwrap_or(false))
    }

    /// Drops all sync records belonging to the user (logout).
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize>;
}
