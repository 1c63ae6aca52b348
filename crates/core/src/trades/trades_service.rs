//! Trade history service.
//!
//! Steady-state refresh is incremental: the sync-metadata value carries the
//! newest close timestamp seen, the next fetch asks the venue for everything
//! since, and `insert_ignore` makes re-delivered rows harmless.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;

use crate::cache::{refresh_partition, RefreshGate, RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::partition::{EntityKind, Partition};
use crate::remote::{map_trade, TradingApiTrait};
use crate::sync::SyncTrackerTrait;
use crate::trades::{Trade, TradeRepositoryTrait, TradeServiceTrait};

pub struct TradeService {
    repository: Arc<dyn TradeRepositoryTrait>,
    remote: Arc<dyn TradingApiTrait>,
    tracker: Arc<dyn SyncTrackerTrait>,
    gate: Arc<RefreshGate>,
}

impl TradeService {
    pub fn new(
        repository: Arc<dyn TradeRepositoryTrait>,
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

    fn checkpoint(&self, key: &str) -> Result<Option<i64>> {
        Ok(self
            .tracker
            .last_sync(key)?
            .and_then(|meta| meta.value)
            .and_then(|value| value.parse::<i64>().ok()))
    }
}

#[async_trait]
impl TradeServiceTrait for TradeService {
    async fn refresh(&self, partition: &Partition) -> Result<RefreshOutcome> {
        let key = partition.sync_key(EntityKind::Trade);
        let since_ms = self.checkpoint(&key)?;

        let inserted = {
            let repository = self.repository.clone();
            let newest_seen = std::sync::Mutex::new(since_ms);
            let outcome = refresh_partition(
                &self.gate,
                self.tracker.as_ref(),
                &key,
                || async {
                    let dtos = self.remote.fetch_trades(partition, since_ms).await?;
                    let trades: Result<Vec<Trade>> = dtos
                        .into_iter()
                        .map(|dto| map_trade(partition, dto))
                        .collect();
                    let trades = trades?;
                    if let Some(max) = trades.iter().map(|t| t.closed_at.timestamp_millis()).max()
                    {
                        *newest_seen.lock().unwrap() = Some(max);
                    }
                    Ok(trades)
                },
                |trades| async {
                    let inserted = repository.insert_ignore(partition, trades).await?;
                    debug!("trade refresh for {} appended {} rows", partition, inserted);
                    Ok(())
                },
            )
            .await?;

            // Copy the checkpoint out before awaiting; the guard must not
            // live across the await.
            let newest = *newest_seen.lock().unwrap();
            if let (RefreshOutcome::Refreshed { .. }, Some(max)) = (outcome, newest) {
                self.tracker
                    .record_sync_with_value(&key, Utc::now(), &max.to_string())
                    .await?;
            }
            outcome
        };
        Ok(inserted)
    }

    async fn backfill(&self, partition: &Partition) -> Result<RefreshOutcome> {
        let key = partition.sync_key(EntityKind::Trade);
        refresh_partition(
            &self.gate,
            self.tracker.as_ref(),
            &key,
            || async {
                let dtos = self.remote.fetch_trades(partition, None).await?;
                dtos.into_iter()
                    .map(|dto| map_trade(partition, dto))
                    .collect()
            },
            |trades| async { self.repository.replace_all(partition, trades).await },
        )
        .await
    }

    fn get_trades(&self, partition: &Partition, limit: Option<i64>) -> Result<Vec<Trade>> {
        self.repository.get_trades(partition, limit)
    }

    fn get_trades_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Vec<Trade>> {
        self.repository.get_trades_since(partition, since)
    }

    fn pnl_sum_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Decimal> {
        self.repository.pnl_sum_since(partition, since)
    }

    fn observe_trades(&self, partition: &Partition) -> Snapshots<Trade> {
        self.repository.observe_trades(partition)
    }
}
