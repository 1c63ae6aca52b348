//! Trading API trait.

use async_trait::async_trait;

use crate::errors::Result;
use crate::partition::{Exchange, Partition};
use crate::remote::remote_dto::*;

/// Boundary to the remote trading API. Implementations wrap the per-venue
/// REST clients; every transport or decode failure must surface as
/// `Error::FetchFailed` so the refresh path can preserve the cached snapshot.
/// Fetches may suspend arbitrarily long and must be cancellation-safe.
#[async_trait]
pub trait TradingApiTrait: Send + Sync {
    async fn fetch_balance(&self, partition: &Partition) -> Result<BalanceDto>;

    async fn fetch_positions(&self, partition: &Partition) -> Result<Vec<PositionDto>>;

    async fn fetch_orders(&self, partition: &Partition) -> Result<Vec<OrderDto>>;

    /// Closed trades newer than `since_ms` (venue epoch millis); `None`
    /// requests the venue's full retained history for backfill.
    async fn fetch_trades(
        &self,
        partition: &Partition,
        since_ms: Option<i64>,
    ) -> Result<Vec<TradeDto>>;

    async fn fetch_strategy_settings(
        &self,
        user_id: &str,
        exchange: Exchange,
    ) -> Result<Vec<StrategySettingDto>>;

    async fn fetch_screener(&self) -> Result<Vec<ScreenerCoinDto>>;

    async fn fetch_signals(&self) -> Result<Vec<SignalDto>>;
}
