use chrono::{TimeZone, Utc};

use crate::trades::{ExitReason, Trade};

#[test]
fn test_synthesized_id_is_deterministic() {
    let closed_at = Utc.with_ymd_and_hms(2025, 5, 20, 9, 30, 0).unwrap();
    let a = Trade::synthesize_id("1", "BTCUSDT", closed_at);
    let b = Trade::synthesize_id("1", "BTCUSDT", closed_at);
    assert_eq!(a, b);
    assert_eq!(a, format!("1:BTCUSDT:{}", closed_at.timestamp_millis()));
}

#[test]
fn test_synthesized_id_differs_per_user_and_symbol() {
    let closed_at = Utc.with_ymd_and_hms(2025, 5, 20, 9, 30, 0).unwrap();
    assert_ne!(
        Trade::synthesize_id("1", "BTCUSDT", closed_at),
        Trade::synthesize_id("2", "BTCUSDT", closed_at)
    );
    assert_ne!(
        Trade::synthesize_id("1", "BTCUSDT", closed_at),
        Trade::synthesize_id("1", "ETHUSDT", closed_at)
    );
}

#[test]
fn test_exit_reason_round_trip() {
    for reason in [
        ExitReason::Tp,
        ExitReason::Sl,
        ExitReason::Manual,
        ExitReason::Atr,
    ] {
        assert_eq!(ExitReason::parse(reason.as_str()).unwrap(), reason);
    }
    assert!(ExitReason::parse("liquidation").is_err());
}
