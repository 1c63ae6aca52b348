//! Repository for the append-only activity log.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use perpdesk_core::activity_log::{ActivityLogRecord, ActivityLogRepositoryTrait};
use perpdesk_core::cache::{PruneByAge, PurgeUserData};
use perpdesk_core::errors::Result;

use super::model::ActivityLogDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::activity_log;
use crate::utils::format_datetime;

pub struct ActivityLogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ActivityLogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ActivityLogRepositoryTrait for ActivityLogRepository {
    async fn append(&self, record: ActivityLogRecord) -> Result<()> {
        let db_row = ActivityLogDB::from(record);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(activity_log::table)
                    .values(&db_row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    fn get_recent(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityLogRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<ActivityLogDB> = activity_log::table
            .filter(activity_log::user_id.eq(user_id))
            .order(activity_log::created_at.desc())
            .limit(limit)
            .load::<ActivityLogDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(ActivityLogDB::into_domain).collect()
    }

    fn get_unsynced(&self, limit: i64) -> Result<Vec<ActivityLogRecord>> {
        let mut conn = get_connection(&self.pool)?;
        // Oldest first so the central log receives records in event order.
        let rows: Vec<ActivityLogDB> = activity_log::table
            .filter(activity_log::synced.eq(false))
            .order(activity_log::created_at.asc())
            .limit(limit)
            .load::<ActivityLogDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(ActivityLogDB::into_domain).collect()
    }

    async fn mark_synced(&self, ids: &[String]) -> Result<usize> {
        let ids = ids.to_vec();
        self.writer
            .exec(move |conn| {
                diesel::update(activity_log::table.filter(activity_log::id.eq_any(&ids)))
                    .set(activity_log::synced.eq(true))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let cutoff = format_datetime(&cutoff);
        self.writer
            .exec(move |conn| {
                diesel::delete(activity_log::table.filter(activity_log::created_at.lt(&cutoff)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(activity_log::table.filter(activity_log::user_id.eq(&owner)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[async_trait]
impl PruneByAge for ActivityLogRepository {
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        ActivityLogRepositoryTrait::delete_older_than(self, cutoff).await
    }
}

#[async_trait]
impl PurgeUserData for ActivityLogRepository {
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        ActivityLogRepositoryTrait::delete_all_for_user(self, user_id).await
    }
}
