//! Sync-metadata domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of when a `(kind, partition)` cache was last successfully refreshed.
///
/// Keyed by the opaque sync key from [`crate::partition::Partition::sync_key`]
/// (or `EntityKind::global_sync_key` for global kinds). `value` carries an
/// optional opaque checkpoint for incremental "since" fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetadata {
    pub key: String,
    pub value: Option<String>,
    pub synced_at: DateTime<Utc>,
}

impl SyncMetadata {
    pub fn new(key: impl Into<String>, synced_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            value: None,
            synced_at,
        }
    }

    /// Age of this sync record at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.synced_at
    }

    /// Whether the cache behind this key is still fresh under `max_age`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: std::time::Duration) -> bool {
        match chrono::Duration::from_std(max_age) {
            Ok(max) => self.age(now) <= max,
            Err(_) => true,
        }
    }
}
