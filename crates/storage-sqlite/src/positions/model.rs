//! Database model for positions.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use perpdesk_core::errors::Result;
use perpdesk_core::partition::{AccountType, Exchange};
use perpdesk_core::positions::{Position, PositionSide};

use crate::utils::{format_datetime, parse_datetime, parse_decimal, parse_decimal_opt};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(primary_key(user_id, symbol, exchange, account_type))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionDB {
    pub user_id: String,
    pub exchange: String,
    pub account_type: String,
    pub symbol: String,
    pub side: String,
    pub size: String,
    pub entry_price: String,
    pub mark_price: String,
    pub leverage: String,
    pub unrealized_pnl: String,
    pub unrealized_pnl_pct: String,
    pub liquidation_price: Option<String>,
    pub take_profit_price: Option<String>,
    pub stop_loss_price: Option<String>,
    pub strategy: Option<String>,
    pub position_value: String,
    pub margin: Option<String>,
    pub opened_at: String,
    pub updated_at: String,
}

impl From<Position> for PositionDB {
    fn from(position: Position) -> Self {
        PositionDB {
            user_id: position.user_id,
            exchange: position.exchange.as_str().to_string(),
            account_type: position.account_type.as_str().to_string(),
            symbol: position.symbol,
            side: position.side.as_str().to_string(),
            size: position.size.to_string(),
            entry_price: position.entry_price.to_string(),
            mark_price: position.mark_price.to_string(),
            leverage: position.leverage.to_string(),
            unrealized_pnl: position.unrealized_pnl.to_string(),
            unrealized_pnl_pct: position.unrealized_pnl_pct.to_string(),
            liquidation_price: position.liquidation_price.map(|d| d.to_string()),
            take_profit_price: position.take_profit_price.map(|d| d.to_string()),
            stop_loss_price: position.stop_loss_price.map(|d| d.to_string()),
            strategy: position.strategy,
            position_value: position.position_value.to_string(),
            margin: position.margin.map(|d| d.to_string()),
            opened_at: format_datetime(&position.opened_at),
            updated_at: format_datetime(&position.updated_at),
        }
    }
}

impl PositionDB {
    /// Enum cells hold canonical values written by this crate; a mismatch
    /// means the row was tampered with and surfaces as a validation error.
    pub fn into_domain(self) -> Result<Position> {
        Ok(Position {
            exchange: Exchange::parse(&self.exchange)?,
            account_type: AccountType::parse(&self.account_type)?,
            side: PositionSide::parse(&self.side)?,
            user_id: self.user_id,
            symbol: self.symbol,
            size: parse_decimal(&self.size, "position.size"),
            entry_price: parse_decimal(&self.entry_price, "position.entry_price"),
            mark_price: parse_decimal(&self.mark_price, "position.mark_price"),
            leverage: parse_decimal(&self.leverage, "position.leverage"),
            unrealized_pnl: parse_decimal(&self.unrealized_pnl, "position.unrealized_pnl"),
            unrealized_pnl_pct: parse_decimal(
                &self.unrealized_pnl_pct,
                "position.unrealized_pnl_pct",
            ),
            liquidation_price: parse_decimal_opt(
                self.liquidation_price.as_deref(),
                "position.liquidation_price",
            ),
            take_profit_price: parse_decimal_opt(
                self.take_profit_price.as_deref(),
                "position.take_profit_price",
            ),
            stop_loss_price: parse_decimal_opt(
                self.stop_loss_price.as_deref(),
                "position.stop_loss_price",
            ),
            strategy: self.strategy,
            position_value: parse_decimal(&self.position_value, "position.position_value"),
            margin: parse_decimal_opt(self.margin.as_deref(), "position.margin"),
            opened_at: parse_datetime(&self.opened_at, "position.opened_at"),
            updated_at: parse_datetime(&self.updated_at, "position.updated_at"),
        })
    }
}
