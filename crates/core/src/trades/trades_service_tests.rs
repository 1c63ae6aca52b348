use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::cache::{RefreshGate, RefreshOutcome, SnapshotBus, Snapshots};
use crate::errors::Result;
use crate::partition::{AccountType, Exchange, Partition};
use crate::remote::*;
use crate::sync::{SyncMetadata, SyncTrackerTrait};
use crate::trades::{Trade, TradeRepositoryTrait, TradeService, TradeServiceTrait};

// --- Mock repository with idempotent inserts ---

#[derive(Default)]
struct MockTradeRepository {
    rows: Mutex<HashMap<String, Vec<Trade>>>,
    bus: SnapshotBus<Trade>,
}

#[async_trait]
impl TradeRepositoryTrait for MockTradeRepository {
    fn get_trades(&self, partition: &Partition, limit: Option<i64>) -> Result<Vec<Trade>> {
        let mut trades = self
            .rows
            .lock()
            .unwrap()
            .get(&partition.key())
            .cloned()
            .unwrap_or_default();
        trades.sort_by(|a, b| b.closed_at.cmp(&a.closed_at));
        if let Some(limit) = limit {
            trades.truncate(limit as usize);
        }
        Ok(trades)
    }

    fn get_trades_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Vec<Trade>> {
        Ok(self
            .get_trades(partition, None)?
            .into_iter()
            .filter(|t| t.closed_at >= since)
            .collect())
    }

    async fn insert_ignore(&self, partition: &Partition, trades: Vec<Trade>) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let stored = rows.entry(partition.key()).or_default();
        let mut inserted = 0;
        for trade in trades {
            if !stored.iter().any(|t| t.id == trade.id) {
                stored.push(trade);
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn replace_all(&self, partition: &Partition, trades: Vec<Trade>) -> Result<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(partition.key(), trades.clone());
        self.bus.publish(&partition.key(), trades);
        Ok(())
    }

    fn pnl_sum_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<Decimal> {
        Ok(self
            .get_trades_since(partition, since)?
            .iter()
            .map(|t| t.pnl)
            .sum())
    }

    fn count_since(&self, partition: &Partition, since: DateTime<Utc>) -> Result<i64> {
        Ok(self.get_trades_since(partition, since)?.len() as i64)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let before: usize = rows.values().map(Vec::len).sum();
        for stored in rows.values_mut() {
            stored.retain(|t| t.closed_at >= cutoff);
        }
        Ok(before - rows.values().map(Vec::len).sum::<usize>())
    }

    fn observe_trades(&self, partition: &Partition) -> Snapshots<Trade> {
        let current = self.get_trades(partition, None).unwrap_or_default();
        self.bus.subscribe_with(&partition.key(), || current)
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let before: usize = rows.values().map(Vec::len).sum();
        rows.retain(|key, _| !key.starts_with(&format!("{}:", user_id)));
        Ok(before - rows.values().map(Vec::len).sum::<usize>())
    }
}

// --- Mock sync tracker that retains checkpoint values ---

#[derive(Default)]
struct MockSyncTracker {
    entries: Mutex<HashMap<String, SyncMetadata>>,
}

#[async_trait]
impl SyncTrackerTrait for MockSyncTracker {
    async fn record_sync(&self, key: &str, synced_at: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(existing) if existing.synced_at > synced_at => Ok(existing.synced_at),
            _ => {
                let value = entries.get(key).and_then(|meta| meta.value.clone());
                entries.insert(
                    key.to_string(),
                    SyncMetadata {
                        key: key.to_string(),
                        value,
                        synced_at,
                    },
                );
                Ok(synced_at)
            }
        }
    }

    async fn record_sync_with_value(
        &self,
        key: &str,
        synced_at: DateTime<Utc>,
        value: &str,
    ) -> Result<DateTime<Utc>> {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            SyncMetadata {
                key: key.to_string(),
                value: Some(value.to_string()),
                synced_at,
            },
        );
        Ok(synced_at)
    }

    fn last_sync(&self, key: &str) -> Result<Option<SyncMetadata>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.contains(user_id));
        Ok(before - entries.len())
    }
}

// --- Mock trading API capturing the since argument ---

struct MockTradingApi {
    batches: Mutex<Vec<Vec<TradeDto>>>,
    since_calls: Mutex<Vec<Option<i64>>>,
}

impl MockTradingApi {
    fn returning(batches: Vec<Vec<TradeDto>>) -> Self {
        Self {
            batches: Mutex::new(batches),
            since_calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TradingApiTrait for MockTradingApi {
    async fn fetch_balance(&self, _partition: &Partition) -> Result<BalanceDto> {
        unimplemented!()
    }

    async fn fetch_positions(&self, _partition: &Partition) -> Result<Vec<PositionDto>> {
        unimplemented!()
    }

    async fn fetch_orders(&self, _partition: &Partition) -> Result<Vec<OrderDto>> {
        unimplemented!()
    }

    async fn fetch_trades(
        &self,
        _partition: &Partition,
        since_ms: Option<i64>,
    ) -> Result<Vec<TradeDto>> {
        self.since_calls.lock().unwrap().push(since_ms);
        let mut batches = self.batches.lock().unwrap();
        if batches.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(batches.remove(0))
        }
    }

    async fn fetch_strategy_settings(
        &self,
        _user_id: &str,
        _exchange: Exchange,
    ) -> Result<Vec<StrategySettingDto>> {
        unimplemented!()
    }

    async fn fetch_screener(&self) -> Result<Vec<ScreenerCoinDto>> {
        unimplemented!()
    }

    async fn fetch_signals(&self) -> Result<Vec<SignalDto>> {
        unimplemented!()
    }
}

fn trade_dto(symbol: &str, closed_at: &str) -> TradeDto {
    serde_json::from_str(&format!(
        r#"{{"symbol":"{}","side":"long","entryPrice":"42000","exitPrice":"42500",
            "size":"0.1","pnl":"50","exitReason":"tp","closedAt":"{}"}}"#,
        symbol, closed_at
    ))
    .unwrap()
}

fn demo_partition() -> Partition {
    Partition::new("1", Exchange::Bybit, AccountType::Demo).unwrap()
}

fn service(
    repository: Arc<MockTradeRepository>,
    api: Arc<MockTradingApi>,
    tracker: Arc<MockSyncTracker>,
) -> TradeService {
    TradeService::new(repository, api, tracker, Arc::new(RefreshGate::new()))
}

#[tokio::test]
async fn test_refresh_records_newest_close_as_checkpoint() {
    let repository = Arc::new(MockTradeRepository::default());
    let tracker = Arc::new(MockSyncTracker::default());
    let partition = demo_partition();

    // 2023-11-14T22:13:20Z = 1_700_000_000s; the later close wins.
    let api = Arc::new(MockTradingApi::returning(vec![vec![
        trade_dto("BTCUSDT", "2023-11-14T22:13:20Z"),
        trade_dto("ETHUSDT", "2023-11-14T22:30:00Z"),
    ]]));
    let service = service(repository.clone(), api, tracker.clone());

    let outcome = service.refresh(&partition).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Refreshed { rows: 2 });
    assert_eq!(service.get_trades(&partition, None).unwrap().len(), 2);

    let meta = tracker.last_sync("trades:1:bybit:demo").unwrap().unwrap();
    assert_eq!(meta.value.as_deref(), Some("1700001000000"));
}

#[tokio::test]
async fn test_second_refresh_fetches_since_checkpoint() {
    let repository = Arc::new(MockTradeRepository::default());
    let tracker = Arc::new(MockSyncTracker::default());
    let partition = demo_partition();

    let api = Arc::new(MockTradingApi::returning(vec![
        vec![trade_dto("BTCUSDT", "2023-11-14T22:13:20Z")],
        vec![trade_dto("ETHUSDT", "2023-11-14T23:00:00Z")],
    ]));
    let service = service(repository.clone(), api.clone(), tracker.clone());

    service.refresh(&partition).await.unwrap();
    service.refresh(&partition).await.unwrap();

    let calls = api.since_calls.lock().unwrap().clone();
    assert_eq!(calls, vec![None, Some(1_700_000_000_000)]);
    assert_eq!(service.get_trades(&partition, None).unwrap().len(), 2);
}

#[tokio::test]
async fn test_redelivered_trades_are_not_duplicated() {
    let repository = Arc::new(MockTradeRepository::default());
    let tracker = Arc::new(MockSyncTracker::default());
    let partition = demo_partition();

    let api = Arc::new(MockTradingApi::returning(vec![
        vec![trade_dto("BTCUSDT", "2023-11-14T22:13:20Z")],
        vec![
            trade_dto("BTCUSDT", "2023-11-14T22:13:20Z"),
            trade_dto("ETHUSDT", "2023-11-14T23:00:00Z"),
        ],
    ]));
    let service = service(repository.clone(), api, tracker.clone());

    service.refresh(&partition).await.unwrap();
    service.refresh(&partition).await.unwrap();

    // The first row was redelivered in the second batch and dropped.
    assert_eq!(service.get_trades(&partition, None).unwrap().len(), 2);
}
