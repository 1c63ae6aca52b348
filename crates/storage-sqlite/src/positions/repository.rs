//! Repository for the positions cache.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::error;

use perpdesk_core::cache::{PurgeUserData, SnapshotBus, Snapshots};
use perpdesk_core::errors::Result;
use perpdesk_core::partition::Partition;
use perpdesk_core::positions::{Position, PositionRepositoryTrait};

use super::model::PositionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::positions;

pub struct PositionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    bus: SnapshotBus<Position>,
}

impl PositionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self {
            pool,
            writer,
            bus: SnapshotBus::new(),
        }
    }

    fn load(&self, partition: &Partition) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<PositionDB> = positions::table
            .filter(positions::user_id.eq(&partition.user_id))
            .filter(positions::exchange.eq(partition.exchange.as_str()))
            .filter(positions::account_type.eq(partition.account_type.as_str()))
            .load::<PositionDB>(&mut conn)
            .into_core()?;

        let mut result = rows
            .into_iter()
            .map(PositionDB::into_domain)
            .collect::<Result<Vec<_>>>()?;
        // Pnl is stored as TEXT, so the order-by happens here.
        result.sort_by(|a, b| b.unrealized_pnl.cmp(&a.unrealized_pnl));
        Ok(result)
    }

    /// Re-queries the committed state and pushes it to live subscribers.
    /// Publishing from a fresh read (not the written vec) keeps snapshots in
    /// commit order even if callers race.
    fn republish(&self, partition: &Partition) -> Result<()> {
        let key = partition.key();
        if self.bus.has_observers(&key) {
            let rows = self.load(partition)?;
            self.bus.publish(&key, rows);
        }
        Ok(())
    }
}

#[async_trait]
impl PositionRepositoryTrait for PositionRepository {
    fn get_positions(&self, partition: &Partition) -> Result<Vec<Position>> {
        self.load(partition)
    }

    fn get_position(&self, partition: &Partition, symbol: &str) -> Result<Option<Position>> {
        let mut conn = get_connection(&self.pool)?;
        let row = positions::table
            .find((
                &partition.user_id,
                symbol,
                partition.exchange.as_str(),
                partition.account_type.as_str(),
            ))
            .first::<PositionDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(PositionDB::into_domain).transpose()
    }

    async fn replace_all(&self, partition: &Partition, rows: Vec<Position>) -> Result<()> {
        let db_rows: Vec<PositionDB> = rows.into_iter().map(PositionDB::from).collect();

        let job_partition = partition.clone();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    positions::table
                        .filter(positions::user_id.eq(&job_partition.user_id))
                        .filter(positions::exchange.eq(job_partition.exchange.as_str()))
                        .filter(positions::account_type.eq(job_partition.account_type.as_str())),
                )
                .execute(conn)
                .into_core()?;

                diesel::insert_into(positions::table)
                    .values(&db_rows)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        self.republish(partition)
    }

    fn observe_positions(&self, partition: &Partition) -> Snapshots<Position> {
        self.bus.subscribe_with(&partition.key(), || {
            self.load(partition).unwrap_or_else(|e| {
                error!("failed to seed position snapshot for {}: {}", partition, e);
                Vec::new()
            })
        })
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(positions::table.filter(positions::user_id.eq(&owner)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[async_trait]
impl PurgeUserData for PositionRepository {
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        PositionRepositoryTrait::delete_all_for_user(self, user_id).await
    }
}
