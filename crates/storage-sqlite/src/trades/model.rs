//! Database model for closed trades.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use perpdesk_core::errors::Result;
use perpdesk_core::partition::{AccountType, Exchange};
use perpdesk_core::positions::PositionSide;
use perpdesk_core::trades::{ExitReason, Trade};

use crate::utils::{format_datetime, parse_datetime, parse_decimal};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeDB {
    pub id: String,
    pub user_id: String,
    pub exchange: String,
    pub account_type: String,
    pub symbol: String,
    pub side: String,
    pub entry_price: String,
    pub exit_price: String,
    pub size: String,
    pub pnl: String,
    pub pnl_pct: String,
    pub strategy: Option<String>,
    pub exit_reason: String,
    pub closed_at: String,
}

impl From<Trade> for TradeDB {
    fn from(trade: Trade) -> Self {
        TradeDB {
            id: trade.id,
            user_id: trade.user_id,
            exchange: trade.exchange.as_str().to_string(),
            account_type: trade.account_type.as_str().to_string(),
            symbol: trade.symbol,
            side: trade.side.as_str().to_string(),
            entry_price: trade.entry_price.to_string(),
            exit_price: trade.exit_price.to_string(),
            size: trade.size.to_string(),
            pnl: trade.pnl.to_string(),
            pnl_pct: trade.pnl_pct.to_string(),
            strategy: trade.strategy,
            exit_reason: trade.exit_reason.as_str().to_string(),
            closed_at: format_datetime(&trade.closed_at),
        }
    }
}

impl TradeDB {
    pub fn into_domain(self) -> Result<Trade> {
        Ok(Trade {
            exchange: Exchange::parse(&self.exchange)?,
            account_type: AccountType::parse(&self.account_type)?,
            side: PositionSide::parse(&self.side)?,
            exit_reason: ExitReason::parse(&self.exit_reason)?,
            id: self.id,
            user_id: self.user_id,
            symbol: self.symbol,
            entry_price: parse_decimal(&self.entry_price, "trade.entry_price"),
            exit_price: parse_decimal(&self.exit_price, "trade.exit_price"),
            size: parse_decimal(&self.size, "trade.size"),
            pnl: parse_decimal(&self.pnl, "trade.pnl"),
            pnl_pct: parse_decimal(&self.pnl_pct, "trade.pnl_pct"),
            strategy: self.strategy,
            closed_at: parse_datetime(&self.closed_at, "trade.closed_at"),
        })
    }
}
