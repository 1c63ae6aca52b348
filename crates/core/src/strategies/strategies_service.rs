//! Strategy setting service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::cache::{refresh_partition, RefreshGate, RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::partition::Exchange;
use crate::positions::PositionSide;
use crate::remote::{map_strategy_setting, TradingApiTrait};
use crate::strategies::{
    StrategySetting, StrategySettingRepositoryTrait, StrategySettingServiceTrait,
};
use crate::sync::SyncTrackerTrait;

pub struct StrategySettingService {
    repository: Arc<dyn StrategySettingRepositoryTrait>,
    remote: Arc<dyn TradingApiTrait>,
    tracker: Arc<dyn SyncTrackerTrait>,
    gate: Arc<RefreshGate>,
}

impl StrategySettingService {
    pub fn new(
        repository: Arc<dyn StrategySettingRepositoryTrait>,
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
impl StrategySettingServiceTrait for StrategySettingService {
    async fn refresh(&self, user_id: &str, exchange: Exchange) -> Result<RefreshOutcome> {
        let key = StrategySetting::sync_key(user_id, exchange);
        refresh_partition(
            &self.gate,
            self.tracker.as_ref(),
            &key,
            || async {
                let fetched_at = Utc::now();
                let dtos = self
                    .remote
                    .fetch_strategy_settings(user_id, exchange)
                    .await?;
                dtos.into_iter()
                    .map(|dto| map_strategy_setting(user_id, exchange, dto, fetched_at))
                    .collect()
            },
            |settings| async {
                self.repository
                    .replace_all(user_id, exchange, settings)
                    .await
            },
        )
        .await
    }

    fn get_settings(&self, user_id: &str, exchange: Exchange) -> Result<Vec<StrategySetting>> {
        self.repository.get_settings(user_id, exchange)
    }

    fn get_setting(
        &self,
        user_id: &str,
        exchange: Exchange,
        strategy: &str,
        side: PositionSide,
    ) -> Result<Option<StrategySetting>> {
        self.repository.get_setting(user_id, exchange, strategy, side)
    }

    async fn save_setting(&self, setting: StrategySetting) -> Result<()> {
        self.repository.upsert_setting(setting).await
    }

    fn observe_settings(&self, user_id: &str, exchange: Exchange) -> Snapshots<StrategySetting> {
        self.repository.observe_settings(user_id, exchange)
    }
}
