//! Position service: refresh-and-replace orchestration over the cache.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::warn;

use crate::cache::{refresh_partition, RefreshGate, RefreshOutcome, Snapshots};
use crate::errors::{Error, Result};
use crate::partition::{EntityKind, Partition};
use crate::positions::{Position, PositionRepositoryTrait, PositionServiceTrait};
use crate::remote::{map_position, TradingApiTrait};
use crate::sync::SyncTrackerTrait;

pub struct PositionService {
    repository: Arc<dyn PositionRepositoryTrait>,
    remote: Arc<dyn TradingApiTrait>,
    tracker: Arc<dyn SyncTrackerTrait>,
    gate: Arc<RefreshGate>,
}

impl PositionService {
    pub fn new(
        repository: Arc<dyn PositionRepositoryTrait>,
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
impl PositionServiceTrait for PositionService {
    async fn refresh(&self, partition: &Partition) -> Result<RefreshOutcome> {
        let key = partition.sync_key(EntityKind::Position);
        refresh_partition(
            &self.gate,
            self.tracker.as_ref(),
            &key,
            || async {
                let fetched_at = Utc::now();
                let dtos = self.remote.fetch_positions(partition).await?;
                dtos.into_iter()
                    .map(|dto| map_position(partition, dto, fetched_at))
                    .collect()
            },
            |positions| async { self.repository.replace_all(partition, positions).await },
        )
        .await
    }

    async fn get_or_refresh(
        &self,
        partition: &Partition,
        max_age: std::time::Duration,
    ) -> Result<Vec<Position>> {
        let key = partition.sync_key(EntityKind::Position);
        if !self.tracker.is_fresh(&key, Utc::now(), max_age)? {
            match self.refresh(partition).await {
                Ok(_) => {}
                // Stale-but-present beats empty: a failed fetch falls back to
                // the last good snapshot.
                Err(Error::FetchFailed(reason)) => {
                    warn!("position refresh for {} failed: {}", partition, reason);
                }
                Err(other) => return Err(other),
            }
        }
        self.repository.get_positions(partition)
    }

    fn get_positions(&self, partition: &Partition) -> Result<Vec<Position>> {
        self.repository.get_positions(partition)
    }

    fn observe_positions(&self, partition: &Partition) -> Snapshots<Position> {
        self.repository.observe_positions(partition)
    }
}
