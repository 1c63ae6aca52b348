//! Strategy setting domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::partition::Exchange;
use crate::positions::PositionSide;

/// One rung of a partial take-profit ladder: close `close_pct` percent of the
/// position once price moves `trigger_pct` percent in its favor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTpStep {
    pub trigger_pct: Decimal,
    pub close_pct: Decimal,
}

/// Per-strategy, per-side, per-exchange configuration. Identity is
/// `(user_id, strategy, side, exchange)`; the same strategy may carry
/// different parameters long vs short, or on each venue. Settings apply to
/// both sub-accounts of an exchange, so they are not account-type scoped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySetting {
    pub user_id: String,
    pub strategy: String,
    pub side: PositionSide,
    pub exchange: Exchange,
    pub enabled: bool,
    /// Percent of the account balance committed per entry.
    pub percent: Decimal,
    pub take_profit_pct: Decimal,
    pub stop_loss_pct: Decimal,
    pub leverage: Decimal,
    pub use_atr: bool,
    pub atr_period: Option<u32>,
    pub atr_multiplier: Option<Decimal>,
    /// Adverse move (percent) that triggers a DCA add; None disables DCA.
    pub dca_trigger_pct: Option<Decimal>,
    /// Favorable move (percent) at which the stop is moved to break-even.
    pub break_even_trigger_pct: Option<Decimal>,
    pub partial_tp_ladder: Vec<PartialTpStep>,
    /// Restricts the strategy to a named coin group; None trades everything.
    pub coin_group: Option<String>,
    pub max_positions: u32,
    pub updated_at: DateTime<Utc>,
}

impl StrategySetting {
    /// Sync-metadata key for a user's settings on one exchange. Settings are
    /// exchange-wide, so the key has no account-type component.
    pub fn sync_key(user_id: &str, exchange: Exchange) -> String {
        format!("strategy_settings:{}:{}", user_id, exchange)
    }
}
