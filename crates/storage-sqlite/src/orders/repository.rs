//! Repository for the orders cache.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::error;

use perpdesk_core::cache::{PurgeUserData, SnapshotBus, Snapshots};
use perpdesk_core::errors::Result;
use perpdesk_core::orders::{Order, OrderRepositoryTrait};
use perpdesk_core::partition::Partition;

use super::model::OrderDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::orders;

pub struct OrderRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    bus: SnapshotBus<Order>,
}

impl OrderRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self {
            pool,
            writer,
            bus: SnapshotBus::new(),
        }
    }

    fn load(&self, partition: &Partition) -> Result<Vec<Order>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<OrderDB> = orders::table
            .filter(orders::user_id.eq(&partition.user_id))
            .filter(orders::exchange.eq(partition.exchange.as_str()))
            .filter(orders::account_type.eq(partition.account_type.as_str()))
            .order(orders::created_at.desc())
            .load::<OrderDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(OrderDB::into_domain).collect()
    }

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
impl OrderRepositoryTrait for OrderRepository {
    fn get_orders(&self, partition: &Partition) -> Result<Vec<Order>> {
        self.load(partition)
    }

    fn get_open_orders(&self, partition: &Partition) -> Result<Vec<Order>> {
        Ok(self
            .load(partition)?
            .into_iter()
            .filter(|order| order.status.is_open())
            .collect())
    }

    fn get_order(&self, order_id: &str) -> Result<Option<Order>> {
        let mut conn = get_connection(&self.pool)?;
        let row = orders::table
            .find(order_id)
            .first::<OrderDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(OrderDB::into_domain).transpose()
    }

    async fn replace_all(&self, partition: &Partition, rows: Vec<Order>) -> Result<()> {
        let db_rows: Vec<OrderDB> = rows.into_iter().map(OrderDB::from).collect();

        let job_partition = partition.clone();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    orders::table
                        .filter(orders::user_id.eq(&job_partition.user_id))
                        .filter(orders::exchange.eq(job_partition.exchange.as_str()))
                        .filter(orders::account_type.eq(job_partition.account_type.as_str())),
                )
                .execute(conn)
                .into_core()?;

                diesel::insert_into(orders::table)
                    .values(&db_rows)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        self.republish(partition)
    }

    async fn upsert_order(&self, order: Order) -> Result<()> {
        let partition = order.partition();
        let db_row = OrderDB::from(order);

        self.writer
            .exec(move |conn| {
                diesel::replace_into(orders::table)
                    .values(&db_row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        self.republish(&partition)
    }

    async fn delete_order(&self, partition: &Partition, order_id: &str) -> Result<usize> {
        let id = order_id.to_string();
        let deleted = self
            .writer
            .exec(move |conn| {
                diesel::delete(orders::table.find(&id))
                    .execute(conn)
                    .into_core()
            })
            .await?;

        if deleted > 0 {
            self.republish(partition)?;
        }
        Ok(deleted)
    }

    fn observe_orders(&self, partition: &Partition) -> Snapshots<Order> {
        self.bus.subscribe_with(&partition.key(), || {
            self.load(partition).unwrap_or_else(|e| {
                error!("failed to seed order snapshot for {}: {}", partition, e);
                Vec::new()
            })
        })
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(orders::table.filter(orders::user_id.eq(&owner)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[async_trait]
impl PurgeUserData for OrderRepository {
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        OrderRepositoryTrait::delete_all_for_user(self, user_id).await
    }
}
