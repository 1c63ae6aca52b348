mod common;

use std::time::Duration;

use perpdesk_core::partition::EntityKind;
use perpdesk_core::sync::SyncTrackerTrait;
use perpdesk_storage_sqlite::sync::SyncMetadataRepository;

use common::{bybit_demo, setup, ts};

#[tokio::test]
async fn test_record_sync_is_monotonic() {
    let db = setup();
    let repo = SyncMetadataRepository::new(db.pool.clone(), db.writer.clone());
    let key = bybit_demo("1").sync_key(EntityKind::Position);

    let t1 = ts(1_700_000_100);
    let t0 = ts(1_700_000_000);

    assert_eq!(repo.record_sync(&key, t1).await.unwrap(), t1);

    // Older timestamp arrives late; it must not regress the key.
    assert_eq!(repo.record_sync(&key, t0).await.unwrap(), t1);
    assert_eq!(repo.last_sync(&key).unwrap().unwrap().synced_at, t1);
}

#[tokio::test]
async fn test_checkpoint_value_round_trips() {
    let db = setup();
    let repo = SyncMetadataRepository::new(db.pool.clone(), db.writer.clone());
    let key = bybit_demo("1").sync_key(EntityKind::Trade);

    repo.record_sync_with_value(&key, ts(1_700_000_000), "1700000000000")
        .await
        .unwrap();

    let meta = repo.last_sync(&key).unwrap().unwrap();
    assert_eq!(meta.value.as_deref(), Some("1700000000000"));
}

#[tokio::test]
async fn test_is_fresh_respects_max_age() {
    let db = setup();
    let repo = SyncMetadataRepository::new(db.pool.clone(), db.writer.clone());
    let key = bybit_demo("1").sync_key(EntityKind::Balance);

    assert!(!repo.is_fresh(&key, ts(0), Duration::from_secs(5)).unwrap());

    repo.record_sync(&key, ts(1_700_000_000)).await.unwrap();

    assert!(repo
        .is_fresh(&key, ts(1_700_000_003), Duration::from_secs(5))
        .unwrap());
    assert!(!repo
        .is_fresh(&key, ts(1_700_000_010), Duration::from_secs(5))
        .unwrap());
}

#[tokio::test]
async fn test_purge_keeps_global_keys_and_other_users() {
    let db = setup();
    let repo = SyncMetadataRepository::new(db.pool.clone(), db.writer.clone());

    let user1_key = bybit_demo("1").sync_key(EntityKind::Position);
    let user2_key = bybit_demo("2").sync_key(EntityKind::Position);
    let global_key = EntityKind::ScreenerCoin.global_sync_key();

    repo.record_sync(&user1_key, ts(1_700_000_000)).await.unwrap();
    repo.record_sync(&user2_key, ts(1_700_000_000)).await.unwrap();
    repo.record_sync(&global_key, ts(1_700_000_000)).await.unwrap();

    let removed = repo.delete_all_for_user("1").await.unwrap();
    assert_eq!(removed, 1);
    assert!(repo.last_sync(&user1_key).unwrap().is_none());
    assert!(repo.last_sync(&user2_key).unwrap().is_some());
    assert!(repo.last_sync(&global_key).unwrap().is_some());
}
