//! Repository and service traits for orders.

use async_trait::async_trait;

use crate::cache::{RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::orders::Order;
use crate::partition::Partition;

/// Storage contract for the orders cache. Besides the replace-all backfill
/// path, orders support incremental upsert/delete: `order_id` is
/// server-stable, so venue updates are delta-like status transitions.
#[async_trait]
pub trait OrderRepositoryTrait: Send + Sync {
    /// All orders in the partition, newest first.
    fn get_orders(&self, partition: &Partition) -> Result<Vec<Order>>;

    /// Working orders only (status New or PartiallyFilled), newest first.
    fn get_open_orders(&self, partition: &Partition) -> Result<Vec<Order>>;

    fn get_order(&self, order_id: &str) -> Result<Option<Order>>;

    /// Atomic swap of the partition's order set.
    async fn replace_all(&self, partition: &Partition, orders: Vec<Order>) -> Result<()>;

    /// Inserts or rewrites one order wholesale (last write wins by call
    /// order).
    async fn upsert_order(&self, order: Order) -> Result<()>;

    /// Removes one order by server id; missing ids are a no-op.
    async fn delete_order(&self, partition: &Partition, order_id: &str) -> Result<usize>;

    fn observe_orders(&self, partition: &Partition) -> Snapshots<Order>;

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait OrderServiceTrait: Send + Sync {
    async fn refresh(&self, partition: &Partition) -> Result<RefreshOutcome>;

    async fn get_or_refresh(
        &self,
        partition: &Partition,
        max_age: std::time::Duration,
    ) -> Result<Vec<Order>>;

    fn get_orders(&self, partition: &Partition) -> Result<Vec<Order>>;

    fn get_open_orders(&self, partition: &Partition) -> Result<Vec<Order>>;

    /// Applies one delta-style order update from the venue stream.
    async fn apply_order_update(&self, order: Order) -> Result<()>;

    /// Drops an order the venue reports as gone.
    async fn apply_order_removal(&self, partition: &Partition, order_id: &str) -> Result<()>;

    fn observe_orders(&self, partition: &Partition) -> Snapshots<Order>;
}
