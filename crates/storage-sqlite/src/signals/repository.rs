//! Repository for the global signal table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use log::error;

use perpdesk_core::cache::{PruneByAge, SnapshotBus, Snapshots};
use perpdesk_core::errors::Result;
use perpdesk_core::partition::EntityKind;
use perpdesk_core::signals::{Signal, SignalRepositoryTrait, SignalStatus};

use super::model::SignalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::signals;
use crate::utils::format_datetime;

pub struct SignalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    bus: SnapshotBus<Signal>,
}

impl SignalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self {
            pool,
            writer,
            bus: SnapshotBus::new(),
        }
    }

    fn load(&self) -> Result<Vec<Signal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<SignalDB> = signals::table
            .order(signals::created_at.desc())
            .load::<SignalDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(SignalDB::into_domain).collect()
    }

    fn republish(&self) -> Result<()> {
        let key = EntityKind::Signal.global_sync_key();
        if self.bus.has_observers(&key) {
            let rows = self.load()?;
            self.bus.publish(&key, rows);
        }
        Ok(())
    }
}

#[async_trait]
impl SignalRepositoryTrait for SignalRepository {
    fn get_signals(&self) -> Result<Vec<Signal>> {
        self.load()
    }

    fn get_signals_by_status(&self, status: SignalStatus) -> Result<Vec<Signal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<SignalDB> = signals::table
            .filter(signals::status.eq(status.as_str()))
            .order(signals::created_at.desc())
            .load::<SignalDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(SignalDB::into_domain).collect()
    }

    async fn replace_all(&self, rows: Vec<Signal>) -> Result<()> {
        let db_rows: Vec<SignalDB> = rows.into_iter().map(SignalDB::from).collect();

        self.writer
            .exec(move |conn| {
                diesel::delete(signals::table).execute(conn).into_core()?;

                diesel::insert_into(signals::table)
                    .values(&db_rows)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        self.republish()
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let cutoff = format_datetime(&cutoff);
        self.writer
            .exec(move |conn| {
                diesel::delete(signals::table.filter(signals::created_at.lt(&cutoff)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn observe_signals(&self) -> Snapshots<Signal> {
        self.bus
            .subscribe_with(&EntityKind::Signal.global_sync_key(), || {
                self.load().unwrap_or_else(|e| {
                    error!("failed to seed signal snapshot: {}", e);
                    Vec::new()
                })
            })
    }
}

#[async_trait]
impl PruneByAge for SignalRepository {
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        SignalRepositoryTrait::delete_older_than(self, cutoff).await
    }
}
