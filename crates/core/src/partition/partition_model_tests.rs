use super::partition_model::*;

#[test]
fn test_account_type_validity_per_exchange() {
    assert!(AccountType::Demo.valid_for(Exchange::Bybit));
    assert!(AccountType::Real.valid_for(Exchange::Bybit));
    assert!(!AccountType::Testnet.valid_for(Exchange::Bybit));
    assert!(!AccountType::Mainnet.valid_for(Exchange::Bybit));

    assert!(AccountType::Testnet.valid_for(Exchange::Hyperliquid));
    assert!(AccountType::Mainnet.valid_for(Exchange::Hyperliquid));
    assert!(!AccountType::Demo.valid_for(Exchange::Hyperliquid));
}

#[test]
fn test_partition_rejects_mismatched_account_type() {
    let result = Partition::new("1", Exchange::Hyperliquid, AccountType::Demo);
    assert!(result.is_err());

    let result = Partition::new("1", Exchange::Bybit, AccountType::Demo);
    assert!(result.is_ok());
}

#[test]
fn test_partition_key_format() {
    let partition = Partition::new("42", Exchange::Bybit, AccountType::Real).unwrap();
    assert_eq!(partition.key(), "42:bybit:real");
    assert_eq!(
        partition.sync_key(EntityKind::Position),
        "positions:42:bybit:real"
    );
}

#[test]
fn test_sync_keys_differ_per_kind_and_partition() {
    let demo = Partition::new("1", Exchange::Bybit, AccountType::Demo).unwrap();
    let real = Partition::new("1", Exchange::Bybit, AccountType::Real).unwrap();

    // Same partition, different kinds: independent.
    assert_ne!(
        demo.sync_key(EntityKind::Position),
        demo.sync_key(EntityKind::Order)
    );
    // Same kind, different account type: independent.
    assert_ne!(
        demo.sync_key(EntityKind::Position),
        real.sync_key(EntityKind::Position)
    );
}

#[test]
fn test_global_kinds() {
    assert!(EntityKind::ScreenerCoin.is_global());
    assert!(EntityKind::Signal.is_global());
    assert!(!EntityKind::Position.is_global());
    assert_eq!(EntityKind::ScreenerCoin.global_sync_key(), "screener:global");
}

#[test]
fn test_exchange_round_trip() {
    for exchange in [Exchange::Bybit, Exchange::Hyperliquid] {
        assert_eq!(Exchange::parse(exchange.as_str()).unwrap(), exchange);
    }
    assert!(Exchange::parse("binance").is_err());
}
