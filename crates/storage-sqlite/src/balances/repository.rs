//! Repository for balance snapshots. One row per partition, overwritten on
//! every refresh.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::error;

use perpdesk_core::balances::{BalanceRepositoryTrait, BalanceSnapshot};
use perpdesk_core::cache::{PurgeUserData, SnapshotBus, Snapshots};
use perpdesk_core::errors::Result;
use perpdesk_core::partition::Partition;

use super::model::BalanceSnapshotDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::balance_snapshots;

pub struct BalanceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    bus: SnapshotBus<BalanceSnapshot>,
}

impl BalanceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self {
            pool,
            writer,
            bus: SnapshotBus::new(),
        }
    }

    fn load(&self, partition: &Partition) -> Result<Option<BalanceSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let row = balance_snapshots::table
            .find((
                &partition.user_id,
                partition.exchange.as_str(),
                partition.account_type.as_str(),
            ))
            .first::<BalanceSnapshotDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(BalanceSnapshotDB::into_domain).transpose()
    }

    fn republish(&self, partition: &Partition) -> Result<()> {
        let key = partition.key();
        if self.bus.has_observers(&key) {
            let rows = self.load(partition)?.into_iter().collect();
            self.bus.publish(&key, rows);
        }
        Ok(())
    }
}

#[async_trait]
impl BalanceRepositoryTrait for BalanceRepository {
    fn get_balance(&self, partition: &Partition) -> Result<Option<BalanceSnapshot>> {
        self.load(partition)
    }

    async fn upsert_balance(&self, balance: BalanceSnapshot) -> Result<()> {
        let partition = balance.partition();
        let db_row = BalanceSnapshotDB::from(balance);

        self.writer
            .exec(move |conn| {
                diesel::replace_into(balance_snapshots::table)
                    .values(&db_row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        self.republish(&partition)
    }

    fn observe_balance(&self, partition: &Partition) -> Snapshots<BalanceSnapshot> {
        self.bus.subscribe_with(&partition.key(), || {
            self.load(partition)
                .unwrap_or_else(|e| {
                    error!("failed to seed balance snapshot for {}: {}", partition, e);
                    None
                })
                .into_iter()
                .collect()
        })
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    balance_snapshots::table.filter(balance_snapshots::user_id.eq(&owner)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}

#[async_trait]
impl PurgeUserData for BalanceRepository {
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        BalanceRepositoryTrait::delete_all_for_user(self, user_id).await
    }
}
