//! Repository and service traits for the market screener.

use async_trait::async_trait;

use crate::cache::{RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::screener::ScreenerCoin;

/// Storage contract for the screener table. One implicit global partition
/// shared by all users of this store instance.
#[async_trait]
pub trait ScreenerRepositoryTrait: Send + Sync {
    /// All coins ordered by 24h change desc.
    fn get_coins(&self) -> Result<Vec<ScreenerCoin>>;

    fn get_coin(&self, symbol: &str) -> Result<Option<ScreenerCoin>>;

    /// Atomic swap of the whole screener table.
    async fn replace_all(&self, coins: Vec<ScreenerCoin>) -> Result<()>;

    fn observe_coins(&self) -> Snapshots<ScreenerCoin>;
}

#[async_trait]
pub trait ScreenerServiceTrait: Send + Sync {
    /// Timer-driven refresh of the global snapshot.
    async fn refresh(&self) -> Result<RefreshOutcome>;

    fn get_coins(&self) -> Result<Vec<ScreenerCoin>>;

    fn get_coin(&self, symbol: &str) -> Result<Option<ScreenerCoin>>;

    fn observe_coins(&self) -> Snapshots<ScreenerCoin>;
}
