mod common;

use perpdesk_core::orders::{OrderRepositoryTrait, OrderStatus};
use perpdesk_storage_sqlite::orders::OrderRepository;

use common::{bybit_demo, dec, order, setup};

#[tokio::test]
async fn test_upsert_rewrites_order_wholesale() {
    let db = setup();
    let repo = OrderRepository::new(db.pool.clone(), db.writer.clone());
    let partition = bybit_demo("1");

    repo.upsert_order(order(&partition, "ord-1", OrderStatus::New))
        .await
        .unwrap();

    let mut filled = order(&partition, "ord-1", OrderStatus::PartiallyFilled);
    filled.filled_qty = dec("0.1");
    repo.upsert_order(filled).await.unwrap();

    let stored = repo.get_order("ord-1").unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::PartiallyFilled);
    assert_eq!(stored.filled_qty, dec("0.1"));
    assert_eq!(repo.get_orders(&partition).unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_orders_excludes_terminal_statuses() {
    let db = setup();
    let repo = OrderRepository::new(db.pool.clone(), db.writer.clone());
    let partition = bybit_demo("1");

    repo.replace_all(
        &partition,
        vec![
            order(&partition, "ord-1", OrderStatus::New),
            order(&partition, "ord-2", OrderStatus::PartiallyFilled),
            order(&partition, "ord-3", OrderStatus::Filled),
            order(&partition, "ord-4", OrderStatus::Cancelled),
        ],
    )
    .await
    .unwrap();

    let open = repo.get_open_orders(&partition).unwrap();
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|o| o.status.is_open()));
}

#[tokio::test]
async fn test_delete_order_is_noop_for_missing_id() {
    let db = setup();
    let repo = OrderRepository::new(db.pool.clone(), db.writer.clone());
    let partition = bybit_demo("1");

    repo.upsert_order(order(&partition, "ord-1", OrderStatus::New))
        .await
        .unwrap();

    assert_eq!(repo.delete_order(&partition, "ord-9").await.unwrap(), 0);
    assert_eq!(repo.delete_order(&partition, "ord-1").await.unwrap(), 1);
    assert!(repo.get_orders(&partition).unwrap().is_empty());
}

#[tokio::test]
async fn test_observer_sees_incremental_updates() {
    let db = setup();
    let repo = OrderRepository::new(db.pool.clone(), db.writer.clone());
    let partition = bybit_demo("1");

    let mut observer = repo.observe_orders(&partition);
    assert!(observer.current().is_empty());

    repo.upsert_order(order(&partition, "ord-1", OrderStatus::New))
        .await
        .unwrap();
    assert_eq!(observer.next().await.unwrap().len(), 1);

    repo.delete_order(&partition, "ord-1").await.unwrap();
    assert!(observer.next().await.unwrap().is_empty());
}
