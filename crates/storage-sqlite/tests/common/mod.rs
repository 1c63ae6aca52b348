//! Shared harness for storage integration tests. Each test gets its own
//! database file in a temp directory, a pool, and a writer actor.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tempfile::TempDir;

use perpdesk_core::orders::{Order, OrderStatus, OrderType};
use perpdesk_core::partition::{AccountType, Exchange, Partition};
use perpdesk_core::positions::{Position, PositionSide};
use perpdesk_core::trades::{ExitReason, Trade};
use perpdesk_storage_sqlite::{init, spawn_writer, DbPool, WriteHandle};

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    _dir: TempDir,
}

pub fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("perpdesk-test.db");
    let pool = init(path.to_str().expect("utf-8 path")).expect("init database");
    let writer = spawn_writer(pool.clone());
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

pub fn dec(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn bybit_demo(user_id: &str) -> Partition {
    Partition::new(user_id, Exchange::Bybit, AccountType::Demo).unwrap()
}

pub fn bybit_real(user_id: &str) -> Partition {
    Partition::new(user_id, Exchange::Bybit, AccountType::Real).unwrap()
}

pub fn position(partition: &Partition, symbol: &str, mark_price: &str) -> Position {
    Position {
        user_id: partition.user_id.clone(),
        exchange: partition.exchange,
        account_type: partition.account_type,
        symbol: symbol.to_string(),
        side: PositionSide::Long,
        size: dec("0.1"),
        entry_price: dec("42000"),
        mark_price: dec(mark_price),
        leverage: dec("10"),
        unrealized_pnl: dec(mark_price) - dec("42000"),
        unrealized_pnl_pct: dec("1"),
        liquidation_price: None,
        take_profit_price: None,
        stop_loss_price: None,
        strategy: None,
        position_value: dec(mark_price) * dec("0.1"),
        margin: Some(dec("420")),
        opened_at: ts(1_700_000_000),
        updated_at: ts(1_700_000_100),
    }
}

pub fn order(partition: &Partition, order_id: &str, status: OrderStatus) -> Order {
    Order {
        order_id: order_id.to_string(),
        user_id: partition.user_id.clone(),
        exchange: partition.exchange,
        account_type: partition.account_type,
        symbol: "BTCUSDT".to_string(),
        side: PositionSide::Long,
        order_type: OrderType::Limit,
        price: Some(dec("41000")),
        qty: dec("0.2"),
        filled_qty: dec("0"),
        status,
        created_at: ts(1_700_000_000),
        updated_at: ts(1_700_000_000),
    }
}

pub fn trade(partition: &Partition, symbol: &str, closed_at: DateTime<Utc>) -> Trade {
    Trade {
        id: Trade::synthesize_id(&partition.user_id, symbol, closed_at),
        user_id: partition.user_id.clone(),
        exchange: partition.exchange,
        account_type: partition.account_type,
        symbol: symbol.to_string(),
        side: PositionSide::Long,
        entry_price: dec("42000"),
        exit_price: dec("43000"),
        size: dec("0.1"),
        pnl: dec("100"),
        pnl_pct: dec("2.38"),
        strategy: Some("trend".to_string()),
        exit_reason: ExitReason::Tp,
        closed_at,
    }
}
