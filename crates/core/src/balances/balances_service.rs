//! Balance service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::warn;

use crate::balances::{BalanceRepositoryTrait, BalanceServiceTrait, BalanceSnapshot};
use crate::cache::{refresh_partition, RefreshGate, RefreshOutcome, Snapshots};
use crate::errors::{Error, Result};
use crate::partition::{EntityKind, Partition};
use crate::remote::{map_balance, TradingApiTrait};
use crate::sync::SyncTrackerTrait;

pub struct BalanceService {
    repository: Arc<dyn BalanceRepositoryTrait>,
    remote: Arc<dyn TradingApiTrait>,
    tracker: Arc<dyn SyncTrackerTrait>,
    gate: Arc<RefreshGate>,
}

impl BalanceService {
    pub fn new(
        repository: Arc<dyn BalanceRepositoryTrait>,
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
impl BalanceServiceTrait for BalanceService {
    async fn refresh(&self, partition: &Partition) -> Result<RefreshOutcome> {
        let key = partition.sync_key(EntityKind::Balance);
        refresh_partition(
            &self.gate,
            self.tracker.as_ref(),
            &key,
            || async {
                let dto = self.remote.fetch_balance(partition).await?;
                Ok(vec![map_balance(partition, dto, Utc::now())])
            },
            |mut rows| async move {
                // The payload is a single projection; a missing row would be
                // a decode failure upstream, not an empty partition.
                match rows.pop() {
                    Some(balance) => self.repository.upsert_balance(balance).await,
                    None => Ok(()),
                }
            },
        )
        .await
    }

    async fn get_or_refresh(
        &self,
        partition: &Partition,
        max_age: std::time::Duration,
    ) -> Result<Option<BalanceSnapshot>> {
        let key = partition.sync_key(EntityKind::Balance);
        if !self.tracker.is_fresh(&key, Utc::now(), max_age)? {
            match self.refresh(partition).await {
                Ok(_) => {}
                Err(Error::FetchFailed(reason)) => {
                    warn!("balance refresh for {} failed: {}", partition, reason);
                }
                Err(other) => return Err(other),
            }
        }
        self.repository.get_balance(partition)
    }

    fn get_balance(&self, partition: &Partition) -> Result<Option<BalanceSnapshot>> {
        self.repository.get_balance(partition)
    }

    fn observe_balance(&self, partition: &Partition) -> Snapshots<BalanceSnapshot> {
        self.repository.observe_balance(partition)
    }
}
