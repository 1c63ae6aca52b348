//! Repository for closed-trade history.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use log::error;
use rust_decimal::Decimal;

use perpdesk_core::cache::{PruneByAge, PurgeUserData, SnapshotBus, Snapshots};
use perpdesk_core::errors::Result;
use perpdesk_core::partition::Partition;
use perpdesk_core::trades::{Trade, TradeRepositoryTrait};

use super::model::TradeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::trades;
use crate::utils::format_datetime;

pub struct TradeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    bus: SnapshotBus<Trade>,
}

impl TradeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self {
            pool,
            writer,
            bus: SnapshotBus::new(),
        }
    }

    fn load(&self, partition: &Partition, limit: Option<i64>) -> Result<Vec<Trade>> {
        let mut conn = get_connection(&self.pool)?;
        // closed_at is uniform RFC 3339 UTC, so TEXT ordering is time order.
        let mut query = trades::table
            .filter(trades::user_id.eq(&partition.user_id))
            .filter(trades::exchange.eq(partition.exchange.as_str()))
            .filter(trades::account_type.eq(partition.account_type.as_str()))
            .order(trades::closed_at.desc())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let rows: Vec<TradeDB> = query.load::<TradeDB>(&mut conn).into_core()?;
        rows.into_iter().map(TradeDB::into_domain).collect()
    }

    fn republish(&self, partition: &Partition) -> Result<()> {
        let key = partition.key();
        if self.bus.has_observers(&key) {
            let rows = self.load(partition, None)?;
            self.bus.publish(&key, rows);
        }
        Ok(())
    }
}

#[async_trait]
impl TradeRepositoryTrait for TradeRepository {
    fn get_trades(&self, partition: &Partition, limit: Option<i64>) -> Result<Vec<Trade>> {
        self.load(partition, limit)
    }

    fn get_trades_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Vec<Trade>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<TradeDB> = trades::table
            .filter(trades::user_id.eq(&partition.user_id))
            .filter(trades::exchange.eq(partition.exchange.as_str()))
            .filter(trades::account_type.eq(partition.account_type.as_str()))
            .filter(trades::closed_at.ge(format_datetime(&since)))
            .order(trades::closed_at.desc())
            .load::<TradeDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(TradeDB::into_domain).collect()
    }

    async fn insert_ignore(&self, partition: &Partition, rows: Vec<Trade>) -> Result<usize> {
        let db_rows: Vec<TradeDB> = rows.into_iter().map(TradeDB::from).collect();

        let inserted = self
            .writer
            .exec(move |conn| {
                diesel::insert_or_ignore_into(trades::table)
                    .values(&db_rows)
                    .execute(conn)
                    .into_core()
            })
            .await?;

        if inserted > 0 {
            self.republish(partition)?;
        }
        Ok(inserted)
    }

    async fn replace_all(&self, partition: &Partition, rows: Vec<Trade>) -> Result<()> {
        let db_rows: Vec<TradeDB> = rows.into_iter().map(TradeDB::from).collect();

        let job_partition = partition.clone();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    trades::table
                        .filter(trades::user_id.eq(&job_partition.user_id))
                        .filter(trades::exchange.eq(job_partition.exchange.as_str()))
                        .filter(trades::account_type.eq(job_partition.account_type.as_str())),
                )
                .execute(conn)
                .into_core()?;

                diesel::insert_into(trades::table)
                    .values(&db_rows)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        self.republish(partition)
    }

    fn pnl_sum_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Decimal> {
        // TEXT decimals cannot be summed in SQL; sum the parsed values.
        Ok(self
            .get_trades_since(partition, since)?
            .iter()
            .map(|trade| trade.pnl)
            .sum())
    }

    fn count_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        trades::table
            .filter(trades::user_id.eq(&partition.user_id))
            .filter(trades::exchange.eq(partition.exchange.as_str()))
            .filter(trades::account_type.eq(partition.account_type.as_str()))
            .filter(trades::closed_at.ge(format_datetime(&since)))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let cutoff = format_datetime(&cutoff);
        self.writer
            .exec(move |conn| {
                diesel::delete(trades::table.filter(trades::closed_at.lt(&cutoff)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn observe_trades(&self, partition: &Partition) -> Snapshots<Trade> {
        self.bus.subscribe_with(&partition.key(), || {
            self.load(partition, None).unwrap_or_else(|e| {
                error!("failed to seed trade snapshot for {}: {}", partition, e);
                Vec::new()
            })
        })
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(trades::table.filter(trades::user_id.eq(&owner)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[async_trait]
impl PruneByAge for TradeRepository {
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        TradeRepositoryTrait::delete_older_than(self, cutoff).await
    }
}

#[async_trait]
impl PurgeUserData for TradeRepository {
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        TradeRepositoryTrait::delete_all_for_user(self, user_id).await
    }
}
