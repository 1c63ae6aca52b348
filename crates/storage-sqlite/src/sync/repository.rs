//! Sync-metadata repository.
//!
//! The monotonic guard lives inside the write transaction: the stored
//! timestamp is read and compared under the same lock that writes it, so two
//! racing `record_sync` calls can never regress the key.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use log::debug;

use perpdesk_core::errors::Result;
use perpdesk_core::sync::{SyncMetadata, SyncTrackerTrait};

use super::model::SyncMetadataDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::sync_metadata;
use crate::utils::{format_datetime, parse_datetime};

pub struct SyncMetadataRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SyncMetadataRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    async fn record(
        &self,
        key: &str,
        synced_at: DateTime<Utc>,
        value: Option<String>,
    ) -> Result<DateTime<Utc>> {
        let sync_key = key.to_string();
        self.writer
            .exec(move |conn| {
                let existing = sync_metadata::table
                    .find(&sync_key)
                    .first::<SyncMetadataDB>(conn)
                    .optional()
                    .into_core()?;

                if let Some(row) = existing {
                    let stored = parse_datetime(&row.synced_at, "sync_metadata.synced_at");
                    if stored >= synced_at {
                        // Out-of-order completion of a concurrent refresh;
                        // the newer record wins.
                        debug!(
                            "stale record_sync for '{}' ({} <= {}), ignoring",
                            sync_key, synced_at, stored
                        );
                        return Ok(stored);
                    }
                }

                diesel::replace_into(sync_metadata::table)
                    .values(&SyncMetadataDB {
                        key: sync_key.clone(),
                        value: value.clone(),
                        synced_at: format_datetime(&synced_at),
                    })
                    .execute(conn)
                    .into_core()?;
                Ok(synced_at)
            })
            .await
    }
}

#[async_trait]
impl SyncTrackerTrait for SyncMetadataRepository {
    async fn record_sync(&self, key: &str, synced_at: DateTime<Utc>) -> Result<DateTime<Utc>> {
        self.record(key, synced_at, None).await
    }

    async fn record_sync_with_value(
        &self,
        key: &str,
        synced_at: DateTime<Utc>,
        value: &str,
    ) -> Result<DateTime<Utc>> {
        self.record(key, synced_at, Some(value.to_string())).await
    }

    fn last_sync(&self, key: &str) -> Result<Option<SyncMetadata>> {
        let mut conn = get_connection(&self.pool)?;
        let row = sync_metadata::table
            .find(key)
            .first::<SyncMetadataDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(SyncMetadata::from))
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        // Partition sync keys embed the user id as their second segment;
        // global keys (`{kind}:global`) are left alone.
        let pattern = format!("%:{}:%", user_id);
        self.writer
            .exec(move |conn| {
                diesel::delete(sync_metadata::table.filter(sync_metadata::key.like(&pattern)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[async_trait]
impl perpdesk_core::cache::PurgeUserData for SyncMetadataRepository {
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        SyncTrackerTrait::delete_all_for_user(self, user_id).await
    }
}
