//! Screener service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::cache::{refresh_partition, RefreshGate, RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::partition::EntityKind;
use crate::remote::{map_screener_coin, TradingApiTrait};
use crate::screener::{ScreenerCoin, ScreenerRepositoryTrait, ScreenerServiceTrait};
use crate::sync::SyncTrackerTrait;

pub struct ScreenerService {
    repository: Arc<dyn ScreenerRepositoryTrait>,
    remote: Arc<dyn TradingApiTrait>,
    tracker: Arc<dyn SyncTrackerTrait>,
    gate: Arc<RefreshGate>,
}

impl ScreenerService {
    pub fn new(
        repository: Arc<dyn ScreenerRepositoryTrait>,
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
impl ScreenerServiceTrait for ScreenerService {
    async fn refresh(&self) -> Result<RefreshOutcome> {
        let key = EntityKind::ScreenerCoin.global_sync_key();
        refresh_partition(
            &self.gate,
            self.tracker.as_ref(),
            &key,
            || async {
                let fetched_at = Utc::now();
                let dtos = self.remote.fetch_screener().await?;
                dtos.into_iter()
                    .map(|dto| map_screener_coin(dto, fetched_at))
                    .collect()
            },
            |coins| async { self.repository.replace_all(coins).await },
        )
        .await
    }

    fn get_coins(&self) -> Result<Vec<ScreenerCoin>> {
        self.repository.get_coins()
    }

    fn get_coin(&self, symbol: &str) -> Result<Option<ScreenerCoin>> {
        self.repository.get_coin(symbol)
    }

    fn observe_coins(&self) -> Snapshots<ScreenerCoin> {
        self.repository.observe_coins()
    }
}
