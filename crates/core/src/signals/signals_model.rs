//! Signal domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::positions::PositionSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    Active,
    Triggered,
    Expired,
}

impl SignalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStatus::Active => "active",
            SignalStatus::Triggered => "triggered",
            SignalStatus::Expired => "expired",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "active" => Ok(SignalStatus::Active),
            "triggered" => Ok(SignalStatus::Triggered),
            "expired" => Ok(SignalStatus::Expired),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown signal status '{}'",
                other
            )))),
        }
    }
}

/// One strategy signal. Global per deployment: not scoped by exchange or
/// account, refreshed on a timer and age-pruned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: String,
    pub strategy: String,
    pub symbol: String,
    pub direction: PositionSide,
    pub entry_price: Decimal,
    pub take_profit: Decimal,
    pub stop_loss: Decimal,
    /// 0..=100 model confidence.
    pub confidence: Decimal,
    pub status: SignalStatus,
    pub created_at: DateTime<Utc>,
}
