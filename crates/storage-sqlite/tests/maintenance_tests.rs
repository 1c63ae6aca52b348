mod common;

use std::sync::Arc;

use perpdesk_core::cache::MaintenanceService;
use perpdesk_core::partition::EntityKind;
use perpdesk_core::positions::PositionRepositoryTrait;
use perpdesk_core::sync::SyncTrackerTrait;
use perpdesk_core::trades::TradeRepositoryTrait;
use perpdesk_storage_sqlite::positions::PositionRepository;
use perpdesk_storage_sqlite::sync::SyncMetadataRepository;
use perpdesk_storage_sqlite::trades::TradeRepository;

use common::{bybit_demo, position, setup, trade, ts};

#[tokio::test]
async fn test_logout_purge_removes_only_that_user() {
    let db = setup();
    let positions = Arc::new(PositionRepository::new(db.pool.clone(), db.writer.clone()));
    let trades = Arc::new(TradeRepository::new(db.pool.clone(), db.writer.clone()));
    let tracker = Arc::new(SyncMetadataRepository::new(db.pool.clone(), db.writer.clone()));

    let leaving = bybit_demo("1");
    let staying = bybit_demo("2");

    positions
        .replace_all(&leaving, vec![position(&leaving, "BTCUSDT", "42000")])
        .await
        .unwrap();
    positions
        .replace_all(&staying, vec![position(&staying, "BTCUSDT", "42000")])
        .await
        .unwrap();
    trades
        .insert_ignore(&leaving, vec![trade(&leaving, "BTCUSDT", ts(1_700_000_000))])
        .await
        .unwrap();
    tracker
        .record_sync(&leaving.sync_key(EntityKind::Position), ts(1_700_000_000))
        .await
        .unwrap();

    let maintenance = MaintenanceService::new()
        .register_purgeable(positions.clone())
        .register_purgeable(trades.clone())
        .register_purgeable(tracker.clone());

    let removed = maintenance.purge_user("1").await.unwrap();
    assert_eq!(removed, 3);

    assert!(positions.get_positions(&leaving).unwrap().is_empty());
    assert_eq!(positions.get_positions(&staying).unwrap().len(), 1);
    assert!(trades.get_trades(&leaving, None).unwrap().is_empty());
    assert!(tracker
        .last_sync(&leaving.sync_key(EntityKind::Position))
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_retention_pass_applies_per_kind_windows() {
    let db = setup();
    let trades = Arc::new(TradeRepository::new(db.pool.clone(), db.writer.clone()));
    let partition = bybit_demo("1");

    let now = ts(1_700_000_000);
    let ninety_one_days = 91 * 24 * 3600;
    trades
        .insert_ignore(
            &partition,
            vec![
                trade(&partition, "ANCIENT", ts(1_700_000_000 - ninety_one_days)),
                trade(&partition, "RECENT", ts(1_699_900_000)),
            ],
        )
        .await
        .unwrap();

    let maintenance = MaintenanceService::new()
        .register_prunable(trades.clone(), perpdesk_core::constants::TRADE_RETENTION_DAYS);

    let pruned = maintenance.prune(now).await.unwrap();
    assert_eq!(pruned, 1);

    let remaining = trades.get_trades(&partition, None).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].symbol, "RECENT");
}
