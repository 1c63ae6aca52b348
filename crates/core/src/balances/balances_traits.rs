//! Repository and service traits for balance snapshots.

use async_trait::async_trait;

use crate::balances::BalanceSnapshot;
use crate::cache::{RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::partition::Partition;

#[async_trait]
pub trait BalanceRepositoryTrait: Send + Sync {
    /// The partition's single snapshot row, if one has ever been fetched.
    fn get_balance(&self, partition: &Partition) -> Result<Option<BalanceSnapshot>>;

    /// Overwrites the partition's snapshot wholesale.
    async fn upsert_balance(&self, balance: BalanceSnapshot) -> Result<()>;

    fn observe_balance(&self, partition: &Partition) -> Snapshots<BalanceSnapshot>;

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait BalanceServiceTrait: Send + Sync {
    async fn refresh(&self, partition: &Partition) -> Result<RefreshOutcome>;

    async fn get_or_refresh(
        &self,
        partition: &Partition,
        max_age: std::time::Duration,
    ) -> Result<Option<BalanceSnapshot>>;

    fn get_balance(&self, partition: &Partition) -> Result<Option<BalanceSnapshot>>;

    fn observe_balance(&self, partition: &Partition) -> Snapshots<BalanceSnapshot>;
}
