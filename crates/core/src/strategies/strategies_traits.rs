//! Repository and service traits for strategy settings.

use async_trait::async_trait;

use crate::cache::{RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::partition::Exchange;
use crate::positions::PositionSide;
use crate::strategies::StrategySetting;

/// Storage contract for strategy settings. Scope is `(user, exchange)`; the
/// natural key adds `(strategy, side)`.
#[async_trait]
pub trait StrategySettingRepositoryTrait: Send + Sync {
    fn get_settings(&self, user_id: &str, exchange: Exchange) -> Result<Vec<StrategySetting>>;

    fn get_setting(
        &self,
        user_id: &str,
        exchange: Exchange,
        strategy: &str,
        side: PositionSide,
    ) -> Result<Option<StrategySetting>>;

    /// Atomic swap of the user's settings for one exchange.
    async fn replace_all(
        &self,
        user_id: &str,
        exchange: Exchange,
        settings: Vec<StrategySetting>,
    ) -> Result<()>;

    /// Rewrites one setting wholesale (local edit path).
    async fn upsert_setting(&self, setting: StrategySetting) -> Result<()>;

    fn observe_settings(&self, user_id: &str, exchange: Exchange) -> Snapshots<StrategySetting>;

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait StrategySettingServiceTrait: Send + Sync {
    async fn refresh(&self, user_id: &str, exchange: Exchange) -> Result<RefreshOutcome>;

    fn get_settings(&self, user_id: &str, exchange: Exchange) -> Result<Vec<StrategySetting>>;

    fn get_setting(
        &self,
        user_id: &str,
        exchange: Exchange,
        strategy: &str,
        side: PositionSide,
    ) -> Result<Option<StrategySetting>>;

    /// Persists a locally edited setting; the exchange-side engine picks it
    /// up on its own schedule, so there is no remote push here.
    async fn save_setting(&self, setting: StrategySetting) -> Result<()>;

    fn observe_settings(&self, user_id: &str, exchange: Exchange) -> Snapshots<StrategySetting>;
}
