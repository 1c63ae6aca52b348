//! Order service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::warn;

use crate::cache::{refresh_partition, RefreshGate, RefreshOutcome, Snapshots};
use crate::errors::{Error, Result};
use crate::orders::{Order, OrderRepositoryTrait, OrderServiceTrait};
use crate::partition::{EntityKind, Partition};
use crate::remote::{map_order, TradingApiTrait};
use crate::sync::SyncTrackerTrait;

pub struct OrderService {
    repository: Arc<dyn OrderRepositoryTrait>,
    remote: Arc<dyn TradingApiTrait>,
    tracker: Arc<dyn SyncTrackerTrait>,
    gate: Arc<RefreshGate>,
}

impl OrderService {
    pub fn new(
        repository: Arc<dyn OrderRepositoryTrait>,
        remote: Arc<dyn TradingApiTrait>,
        tracker: Arc<dyn SyncTrackerTrait>,
        gate: Arc<RefreshGate>,
    ) -> Self {
        Self {
            repository,
            remote,
            tracker,
            gate,
        }
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn refresh(&self, partition: &Partition) -> Result<RefreshOutcome> {
        let key = partition.sync_key(EntityKind::Order);
        refresh_partition(
            &self.gate,
            self.tracker.as_ref(),
            &key,
            || async {
                let dtos = self.remote.fetch_orders(partition).await?;
                dtos.into_iter()
                    .map(|dto| map_order(partition, dto))
                    .collect()
            },
            |orders| async { self.repository.replace_all(partition, orders).await },
        )
        .await
    }

    async fn get_or_refresh(
        &self,
        partition: &Partition,
        max_age: std::time::Duration,
    ) -> Result<Vec<Order>> {
        let key = partition.sync_key(EntityKind::Order);
        if !self.tracker.is_fresh(&key, Utc::now(), max_age)? {
            match self.refresh(partition).await {
                Ok(_) => {}
                Err(Error::FetchFailed(reason)) => {
                    warn!("order refresh for {} failed: {}", partition, reason);
                }
                Err(other) => return Err(other),
            }
        }
        self.repository.get_orders(partition)
    }

    fn get_orders(&self, partition: &Partition) -> Result<Vec<Order>> {
        self.repository.get_orders(partition)
    }

    fn get_open_orders(&self, partition: &Partition) -> Result<Vec<Order>> {
        self.repository.get_open_orders(partition)
    }

    async fn apply_order_update(&self, order: Order) -> Result<()> {
        self.repository.upsert_order(order).await
    }

    async fn apply_order_removal(&self, partition: &Partition, order_id: &str) -> Result<()> {
        self.repository.delete_order(partition, order_id).await?;
        Ok(())
    }

    fn observe_orders(&self, partition: &Partition) -> Snapshots<Order> {
        self.repository.observe_orders(partition)
    }
}
