//! Database model for strategy settings.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use perpdesk_core::errors::Result;
use perpdesk_core::partition::Exchange;
use perpdesk_core::positions::PositionSide;
use perpdesk_core::strategies::{PartialTpStep, StrategySetting};

use crate::utils::{format_datetime, parse_datetime, parse_decimal, parse_decimal_opt};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::strategy_settings)]
#[diesel(primary_key(user_id, strategy, side, exchange))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StrategySettingDB {
    pub user_id: String,
    pub strategy: String,
    pub side: String,
    pub exchange: String,
    pub enabled: bool,
    pub percent: String,
    pub take_profit_pct: String,
    pub stop_loss_pct: String,
    pub leverage: String,
    pub use_atr: bool,
    pub atr_period: Option<i32>,
    pub atr_multiplier: Option<String>,
    pub dca_trigger_pct: Option<String>,
    pub break_even_trigger_pct: Option<String>,
    /// JSON array of `{triggerPct, closePct}` steps.
    pub partial_tp_ladder: String,
    pub coin_group: Option<String>,
    pub max_positions: i32,
    pub updated_at: String,
}

impl From<StrategySetting> for StrategySettingDB {
    fn from(setting: StrategySetting) -> Self {
        let ladder =
            serde_json::to_string(&setting.partial_tp_ladder).unwrap_or_else(|_| "[]".to_string());
        StrategySettingDB {
            user_id: setting.user_id,
            strategy: setting.strategy,
            side: setting.side.as_str().to_string(),
            exchange: setting.exchange.as_str().to_string(),
            enabled: setting.enabled,
            percent: setting.percent.to_string(),
            take_profit_pct: setting.take_profit_pct.to_string(),
            stop_loss_pct: setting.stop_loss_pct.to_string(),
            leverage: setting.leverage.to_string(),
            use_atr: setting.use_atr,
            atr_period: setting.atr_period.map(|p| p as i32),
            atr_multiplier: setting.atr_multiplier.map(|d| d.to_string()),
            dca_trigger_pct: setting.dca_trigger_pct.map(|d| d.to_string()),
            break_even_trigger_pct: setting.break_even_trigger_pct.map(|d| d.to_string()),
            partial_tp_ladder: ladder,
            coin_group: setting.coin_group,
            max_positions: setting.max_positions as i32,
            updated_at: format_datetime(&setting.updated_at),
        }
    }
}

impl StrategySettingDB {
    pub fn into_domain(self) -> Result<StrategySetting> {
        let ladder: Vec<PartialTpStep> =
            serde_json::from_str(&self.partial_tp_ladder).unwrap_or_else(|e| {
                log::error!(
                    "Failed to parse partial_tp_ladder '{}': {}. Falling back to empty.",
                    self.partial_tp_ladder,
                    e
                );
                Vec::new()
            });

        Ok(StrategySetting {
            side: PositionSide::parse(&self.side)?,
            exchange: Exchange::parse(&self.exchange)?,
            user_id: self.user_id,
            strategy: self.strategy,
            enabled: self.enabled,
            percent: parse_decimal(&self.percent, "strategy_setting.percent"),
            take_profit_pct: parse_decimal(
                &self.take_profit_pct,
                "strategy_setting.take_profit_pct",
            ),
            stop_loss_pct: parse_decimal(&self.stop_loss_pct, "strategy_setting.stop_loss_pct"),
            leverage: parse_decimal(&self.leverage, "strategy_setting.leverage"),
            use_atr: self.use_atr,
            atr_period: self.atr_period.map(|p| p.max(0) as u32),
            atr_multiplier: parse_decimal_opt(
                self.atr_multiplier.as_deref(),
                "strategy_setting.atr_multiplier",
            ),
            dca_trigger_pct: parse_decimal_opt(
                self.dca_trigger_pct.as_deref(),
                "strategy_setting.dca_trigger_pct",
            ),
            break_even_trigger_pct: parse_decimal_opt(
                self.break_even_trigger_pct.as_deref(),
                "strategy_setting.break_even_trigger_pct",
            ),
            partial_tp_ladder: ladder,
            coin_group: self.coin_group,
            max_positions: self.max_positions.max(0) as u32,
            updated_at: parse_datetime(&self.updated_at, "strategy_setting.updated_at"),
        })
    }
}
