//! Trade (closed position) domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::partition::{AccountType, Exchange, Partition};
use crate::positions::PositionSide;

/// Why the position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitReason {
    Tp,
    Sl,
    Manual,
    Atr,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::Tp => "TP",
            ExitReason::Sl => "SL",
            ExitReason::Manual => "MANUAL",
            ExitReason::Atr => "ATR",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "TP" => Ok(ExitReason::Tp),
            "SL" => Ok(ExitReason::Sl),
            "MANUAL" => Ok(ExitReason::Manual),
            "ATR" => Ok(ExitReason::Atr),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown exit reason '{}'",
                other
            )))),
        }
    }
}

/// One closed trade. Append-mostly: never mutated after insert, only
/// retention-pruned by age. `id` is the server id when the venue provides
/// one, otherwise synthesized from `(user, symbol, close timestamp)` so that
/// repeated history fetches stay idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub user_id: String,
    pub exchange: Exchange,
    pub account_type: AccountType,
    pub symbol: String,
    pub side: PositionSide,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub size: Decimal,
    pub pnl: Decimal,
    pub pnl_pct: Decimal,
    pub strategy: Option<String>,
    pub exit_reason: ExitReason,
    pub closed_at: DateTime<Utc>,
}

impl Trade {
    /// Deterministic id for venues that do not assign one.
    pub fn synthesize_id(user_id: &str, symbol: &str, closed_at: DateTime<Utc>) -> String {
        format!("{}:{}:{}", user_id, symbol, closed_at.timestamp_millis())
    }

    pub fn partition(&self) -> Partition {
        Partition {
            user_id: self.user_id.clone(),
            exchange: self.exchange,
            account_type: self.account_type,
        }
    }
}
