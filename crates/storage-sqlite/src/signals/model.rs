//! Database model for signals.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use perpdesk_core::errors::Result;
use perpdesk_core::positions::PositionSide;
use perpdesk_core::signals::{Signal, SignalStatus};

use crate::utils::{format_datetime, parse_datetime, parse_decimal};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::signals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SignalDB {
    pub id: String,
    pub strategy: String,
    pub symbol: String,
    pub direction: String,
    pub entry_price: String,
    pub take_profit: String,
    pub stop_loss: String,
    pub confidence: String,
    pub status: String,
    pub created_at: String,
}

impl From<Signal> for SignalDB {
    fn from(signal: Signal) -> Self {
        SignalDB {
            id: signal.id,
            strategy: signal.strategy,
            symbol: signal.symbol,
            direction: signal.direction.as_str().to_string(),
            entry_price: signal.entry_price.to_string(),
            take_profit: signal.take_profit.to_string(),
            stop_loss: signal.stop_loss.to_string(),
            confidence: signal.confidence.to_string(),
            status: signal.status.as_str().to_string(),
            created_at: format_datetime(&signal.created_at),
        }
    }
}

impl SignalDB {
    pub fn into_domain(self) -> Result<Signal> {
        Ok(Signal {
            direction: PositionSide::parse(&self.direction)?,
            status: SignalStatus::parse(&self.status)?,
            id: self.id,
            strategy: self.strategy,
            symbol: self.symbol,
            entry_price: parse_decimal(&self.entry_price, "signal.entry_price"),
            take_profit: parse_decimal(&self.take_profit, "signal.take_profit"),
            stop_loss: parse_decimal(&self.stop_loss, "signal.stop_loss"),
            confidence: parse_decimal(&self.confidence, "signal.confidence"),
            created_at: parse_datetime(&self.created_at, "signal.created_at"),
        })
    }
}
