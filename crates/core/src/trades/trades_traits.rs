//! Repository and service traits for trade history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::cache::{RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::partition::Partition;
use crate::trades::Trade;

/// Storage contract for closed-trade history. Append-mostly: the idempotent
/// `insert_ignore` path is the steady-state write, full replace exists for
/// initial backfill only.
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    /// Trades in the partition ordered by close time desc.
    fn get_trades(&self, partition: &Partition, limit: Option<i64>) -> Result<Vec<Trade>>;

    /// Trades closed at or after `since`, ordered by close time desc.
    fn get_trades_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Vec<Trade>>;

    /// Inserts trades, silently dropping rows whose id already exists.
    /// Returns the number actually inserted.
    async fn insert_ignore(&self, partition: &Partition, trades: Vec<Trade>) -> Result<usize>;

    /// Full backfill: atomically swaps the partition's history.
    async fn replace_all(&self, partition: &Partition, trades: Vec<Trade>) -> Result<()>;

    /// Realized pnl summed over trades closed at or after `since`.
    fn pnl_sum_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Decimal>;

    fn count_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<i64>;

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize>;

    fn observe_trades(&self, partition: &Partition) -> Snapshots<Trade>;

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    /// Incremental refresh: fetches trades since the partition's last sync
    /// checkpoint and appends them idempotently.
    async fn refresh(&self, partition: &Partition) -> Result<RefreshOutcome>;

    /// Full backfill replacing the partition's cached history.
    async fn backfill(&self, partition: &Partition) -> Result<RefreshOutcome>;

    fn get_trades(&self, partition: &Partition, limit: Option<i64>) -> Result<Vec<Trade>>;

    fn get_trades_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Vec<Trade>>;

    fn pnl_sum_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Decimal>;

    fn observe_trades(&self, partition: &Partition) -> Snapshots<Trade>;
}
