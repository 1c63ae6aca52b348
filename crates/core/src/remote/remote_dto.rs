//! Wire payload shapes from the trading API.
//!
//! The API serves several client generations, so many fields arrive under
//! two names (`pnlPct` vs `pnl_percent`) and most numerics are optional.
//! Serde aliases collect every spelling here; `remote_mapper` resolves the
//! result into canonical entities. Alias ambiguity never crosses that
//! boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDto {
    pub equity: Decimal,
    #[serde(alias = "available_balance", alias = "availableToTrade")]
    pub available: Decimal,
    #[serde(alias = "wallet_balance")]
    pub wallet_balance: Decimal,
    #[serde(default, alias = "unrealised_pnl", alias = "unrealized_pnl")]
    pub unrealized_pnl: Decimal,
    #[serde(default, alias = "margin_used", alias = "totalMarginUsed")]
    pub margin_used: Decimal,
    #[serde(default, alias = "today_pnl")]
    pub today_pnl: Decimal,
    #[serde(default, alias = "week_pnl")]
    pub week_pnl: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    pub symbol: String,
    pub side: String,
    pub size: Decimal,
    #[serde(alias = "entry_price", alias = "avgPrice")]
    pub entry_price: Decimal,
    #[serde(alias = "mark_price")]
    pub mark_price: Decimal,
    #[serde(default = "default_leverage")]
    pub leverage: Decimal,
    #[serde(alias = "unrealised_pnl", alias = "unrealized_pnl")]
    pub unrealized_pnl: Decimal,
    #[serde(default, alias = "pnl_pct", alias = "pnl_percent")]
    pub pnl_pct: Option<Decimal>,
    #[serde(default, alias = "liq_price", alias = "liquidation_price")]
    pub liquidation_price: Option<Decimal>,
    #[serde(default, alias = "take_profit", alias = "tpPrice")]
    pub take_profit: Option<Decimal>,
    #[serde(default, alias = "stop_loss", alias = "slPrice")]
    pub stop_loss: Option<Decimal>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default, alias = "position_value")]
    pub position_value: Option<Decimal>,
    #[serde(default)]
    pub margin: Option<Decimal>,
    #[serde(default, alias = "created_time", alias = "opened_at")]
    pub opened_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_time", alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_leverage() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(alias = "order_id", alias = "orderID")]
    pub order_id: String,
    pub symbol: String,
    pub side: String,
    #[serde(alias = "order_type", alias = "type")]
    pub order_type: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(alias = "quantity")]
    pub qty: Decimal,
    #[serde(default, alias = "filled_qty", alias = "cumExecQty")]
    pub filled_qty: Decimal,
    pub status: String,
    #[serde(alias = "created_time", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "updated_time", alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDto {
    /// Absent on the decentralized venue; the mapper synthesizes one.
    #[serde(default, alias = "trade_id")]
    pub id: Option<String>,
    pub symbol: String,
    pub side: String,
    #[serde(alias = "entry_price")]
    pub entry_price: Decimal,
    #[serde(alias = "exit_price", alias = "closePrice")]
    pub exit_price: Decimal,
    pub size: Decimal,
    pub pnl: Decimal,
    #[serde(default, alias = "pnl_pct", alias = "pnl_percent")]
    pub pnl_pct: Option<Decimal>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(alias = "exit_reason", alias = "closeReason")]
    pub exit_reason: String,
    #[serde(alias = "closed_at", alias = "timestamp")]
    pub closed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySettingDto {
    pub strategy: String,
    pub side: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub percent: Decimal,
    #[serde(alias = "take_profit_pct", alias = "tpPct")]
    pub take_profit_pct: Decimal,
    #[serde(alias = "stop_loss_pct", alias = "slPct")]
    pub stop_loss_pct: Decimal,
    #[serde(default = "default_leverage")]
    pub leverage: Decimal,
    #[serde(default, alias = "use_atr")]
    pub use_atr: bool,
    #[serde(default, alias = "atr_period")]
    pub atr_period: Option<u32>,
    #[serde(default, alias = "atr_multiplier")]
    pub atr_multiplier: Option<Decimal>,
    #[serde(default, alias = "dca_trigger_pct")]
    pub dca_trigger_pct: Option<Decimal>,
    #[serde(default, alias = "break_even_trigger_pct", alias = "beTriggerPct")]
    pub break_even_trigger_pct: Option<Decimal>,
    #[serde(default, alias = "partial_tp_ladder")]
    pub partial_tp_ladder: Vec<PartialTpStepDto>,
    #[serde(default, alias = "coin_group")]
    pub coin_group: Option<String>,
    #[serde(default = "default_max_positions", alias = "max_positions")]
    pub max_positions: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_max_positions() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTpStepDto {
    #[serde(alias = "trigger_pct")]
    pub trigger_pct: Decimal,
    #[serde(alias = "close_pct")]
    pub close_pct: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerCoinDto {
    pub symbol: String,
    #[serde(alias = "last_price", alias = "lastPrice")]
    pub price: Decimal,
    #[serde(alias = "change_24h_pct", alias = "price24hPcnt")]
    pub change_24h_pct: Decimal,
    #[serde(alias = "volume_24h", alias = "turnover24h")]
    pub volume_24h: Decimal,
    #[serde(alias = "high_24h", alias = "highPrice24h")]
    pub high_24h: Decimal,
    #[serde(alias = "low_24h", alias = "lowPrice24h")]
    pub low_24h: Decimal,
    #[serde(default, alias = "open_interest")]
    pub open_interest: Option<Decimal>,
    #[serde(default, alias = "funding_rate")]
    pub funding_rate: Option<Decimal>,
    #[serde(default)]
    pub rsi: Option<Decimal>,
    #[serde(default)]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalDto {
    pub id: String,
    pub strategy: String,
    pub symbol: String,
    pub direction: String,
    #[serde(alias = "entry_price", alias = "entry")]
    pub entry_price: Decimal,
    #[serde(alias = "take_profit", alias = "tp")]
    pub take_profit: Decimal,
    #[serde(alias = "stop_loss", alias = "sl")]
    pub stop_loss: Decimal,
    #[serde(default)]
    pub confidence: Decimal,
    pub status: String,
    #[serde(alias = "created_at", alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}
