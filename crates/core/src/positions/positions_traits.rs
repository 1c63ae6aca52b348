//! Repository and service traits for positions.

use async_trait::async_trait;

use crate::cache::{RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::partition::Partition;
use crate::positions::Position;

/// Storage contract for the positions cache.
#[async_trait]
pub trait PositionRepositoryTrait: Send + Sync {
    /// All open positions in the partition, ordered by unrealized pnl desc.
    fn get_positions(&self, partition: &Partition) -> Result<Vec<Position>>;

    /// Point lookup; absence is a normal outcome.
    fn get_position(&self, partition: &Partition, symbol: &str) -> Result<Option<Position>>;

    /// Atomically swaps the partition's row set for `positions`. Runs even
    /// when `positions` is empty so that closed positions disappear.
    async fn replace_all(&self, partition: &Partition, positions: Vec<Position>) -> Result<()>;

    /// Live snapshots of the partition's positions.
    fn observe_positions(&self, partition: &Partition) -> Snapshots<Position>;

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait PositionServiceTrait: Send + Sync {
    /// Fetches the partition's positions from the venue and replaces the
    /// cached set. A failed fetch is a soft error; the cache is untouched.
    async fn refresh(&self, partition: &Partition) -> Result<RefreshOutcome>;

    /// Serves the cache when it is fresher than `max_age`, refreshing first
    /// otherwise. Falls back to the stale cache when the refresh's fetch step
    /// fails.
    async fn get_or_refresh(
        &self,
        partition: &Partition,
        max_age: std::time::Duration,
    ) -> Result<Vec<Position>>;

    fn get_positions(&self, partition: &Partition) -> Result<Vec<Position>>;

    fn observe_positions(&self, partition: &Partition) -> Snapshots<Position>;
}
