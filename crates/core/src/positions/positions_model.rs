//! Position domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::partition::{AccountType, Exchange, Partition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSide::Long => "long",
            PositionSide::Short => "short",
        }
    }

    /// Parses venue spellings ("Long", "BUY", "sell", ...) into the canonical
    /// side. Alias resolution happens here, at the mapping boundary; the
    /// store only ever sees the canonical value.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "long" | "buy" => Ok(PositionSide::Long),
            "short" | "sell" => Ok(PositionSide::Short),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown position side '{}'",
                other
            )))),
        }
    }
}

/// One open position. Identity is `(user_id, symbol, exchange, account_type)`;
/// there is one row per open symbol per partition and closing removes the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub user_id: String,
    pub exchange: Exchange,
    pub account_type: AccountType,
    pub symbol: String,
    pub side: PositionSide,
    pub size: Decimal,
    pub entry_price: Decimal,
    pub mark_price: Decimal,
    pub leverage: Decimal,
    pub unrealized_pnl: Decimal,
    pub unrealized_pnl_pct: Decimal,
    pub liquidation_price: Option<Decimal>,
    pub take_profit_price: Option<Decimal>,
    pub stop_loss_price: Option<Decimal>,
    pub strategy: Option<String>,
    pub position_value: Decimal,
    pub margin: Option<Decimal>,
    pub opened_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Position {
    pub fn partition(&self) -> Partition {
        Partition {
            user_id: self.user_id.clone(),
            exchange: self.exchange,
            account_type: self.account_type,
        }
    }
}
