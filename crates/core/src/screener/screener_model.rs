//! Screener coin domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Up,
    Down,
    Sideways,
}

impl TrendLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Up => "up",
            TrendLabel::Down => "down",
            TrendLabel::Sideways => "sideways",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "up" | "bullish" => Ok(TrendLabel::Up),
            "down" | "bearish" => Ok(TrendLabel::Down),
            "sideways" | "neutral" | "flat" => Ok(TrendLabel::Sideways),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown trend label '{}'",
                other
            )))),
        }
    }
}

/// Global market snapshot for one symbol. Not user-scoped: all users of this
/// store instance share one screener table, fully replaced on each refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerCoin {
    pub symbol: String,
    pub price: Decimal,
    pub change_24h_pct: Decimal,
    pub volume_24h: Decimal,
    pub high_24h: Decimal,
    pub low_24h: Decimal,
    pub open_interest: Option<Decimal>,
    pub funding_rate: Option<Decimal>,
    pub rsi: Option<Decimal>,
    pub trend: TrendLabel,
    pub updated_at: DateTime<Utc>,
}
