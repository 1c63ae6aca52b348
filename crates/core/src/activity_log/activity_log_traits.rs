//! Repository, sink, and service traits for the activity log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::activity_log::{ActivityLogRecord, NewActivityLogRecord};
use crate::errors::Result;

#[async_trait]
pub trait ActivityLogRepositoryTrait: Send + Sync {
    /// Appends one record; records are never updated afterwards except for
    /// the synced flag.
    async fn append(&self, record: ActivityLogRecord) -> Result<()>;

    /// The user's most recent records, newest first.
    fn get_recent(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityLogRecord>>;

    /// Oldest-first batch of records not yet pushed to the central audit log.
    fn get_unsynced(&self, limit: i64) -> Result<Vec<ActivityLogRecord>>;

    async fn mark_synced(&self, ids: &[String]) -> Result<usize>;

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize>;

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize>;
}

/// Outbound boundary to the central audit log. Best-effort: a failed push
/// leaves the records unsynced for the next flush.
#[async_trait]
pub trait AuditSinkTrait: Send + Sync {
    async fn push_batch(&self, records: &[ActivityLogRecord]) -> Result<()>;
}

#[async_trait]
pub trait ActivityLogServiceTrait: Send + Sync {
    /// Records an action locally. Never fails the calling flow on sync
    /// concerns; only a storage failure propagates.
    async fn record(&self, new_record: NewActivityLogRecord) -> Result<ActivityLogRecord>;

    fn get_recent(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityLogRecord>>;

    /// Pushes one batch of unsynced records to the central log and marks the
    /// delivered ones. Returns how many were delivered.
    async fn flush_unsynced(&self, batch_size: i64) -> Result<usize>;
}
