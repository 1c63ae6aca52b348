//! Shared constants for the cache core.
//!
//! Freshness policy is owned by the calling use-case, not hard-coded in the
//! refresh path; the max-age values here are the defaults the client screens
//! pass to `get_or_refresh`.

use std::time::Duration;

/// Balance is the most volatile partition; refetch after 5 seconds.
pub const BALANCE_MAX_AGE: Duration = Duration::from_secs(5);

/// Open positions and working orders.
pub const POSITIONS_MAX_AGE: Duration = Duration::from_secs(10);
pub const ORDERS_MAX_AGE: Duration = Duration::from_secs(10);

/// Closed-position history changes slowly.
pub const TRADES_MAX_AGE: Duration = Duration::from_secs(60);

/// Global market snapshot, refreshed on a timer.
pub const SCREENER_MAX_AGE: Duration = Duration::from_secs(60);
pub const SIGNALS_MAX_AGE: Duration = Duration::from_secs(30);

/// Retention windows for age-pruned kinds.
pub const TRADE_RETENTION_DAYS: i64 = 90;
pub const SIGNAL_RETENTION_DAYS: i64 = 7;
pub const ACTIVITY_LOG_RETENTION_DAYS: i64 = 30;

/// Well-known app setting keys.
pub const SETTING_LANGUAGE: &str = "language";
pub const SETTING_ACTIVE_EXCHANGE: &str = "active_exchange";
pub const SETTING_ACTIVE_ACCOUNT_TYPE: &str = "active_account_type";
pub const SETTING_TRADING_MODE: &str = "trading_mode";
