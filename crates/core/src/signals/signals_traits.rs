//! Repository and service traits for signals.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::cache::{RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::signals::{Signal, SignalStatus};

/// Storage contract for signals. Global partition, age-pruned.
#[async_trait]
pub trait SignalRepositoryTrait: Send + Sync {
    /// All signals, newest first.
    fn get_signals(&self) -> Result<Vec<Signal>>;

    fn get_signals_by_status(&self, status: SignalStatus) -> Result<Vec<Signal>>;

    /// Atomic swap of the signal table.
    async fn replace_all(&self, signals: Vec<Signal>) -> Result<()>;

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize>;

    fn observe_signals(&self) -> Snapshots<Signal>;
}

#[async_trait]
pub trait SignalServiceTrait: Send + Sync {
    async fn refresh(&self) -> Result<RefreshOutcome>;

    fn get_signals(&self) -> Result<Vec<Signal>>;

    fn get_active_signals(&self) -> Result<Vec<Signal>>;

    fn observe_signals(&self) -> Snapshots<Signal>;
}
