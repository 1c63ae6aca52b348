//! Database model for screener coins.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use perpdesk_core::errors::Result;
use perpdesk_core::screener::{ScreenerCoin, TrendLabel};

use crate::utils::{format_datetime, parse_datetime, parse_decimal, parse_decimal_opt};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::screener_coins)]
#[diesel(primary_key(symbol))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScreenerCoinDB {
    pub symbol: String,
    pub price: String,
    pub change_24h_pct: String,
    pub volume_24h: String,
    pub high_24h: String,
    pub low_24h: String,
    pub open_interest: Option<String>,
    pub funding_rate: Option<String>,
    pub rsi: Option<String>,
    pub trend: String,
    pub updated_at: String,
}

impl From<ScreenerCoin> for ScreenerCoinDB {
    fn from(coin: ScreenerCoin) -> Self {
        ScreenerCoinDB {
            symbol: coin.symbol,
            price: coin.price.to_string(),
            change_24h_pct: coin.change_24h_pct.to_string(),
            volume_24h: coin.volume_24h.to_string(),
            high_24h: coin.high_24h.to_string(),
            low_24h: coin.low_24h.to_string(),
            open_interest: coin.open_interest.map(|d| d.to_string()),
            funding_rate: coin.funding_rate.map(|d| d.to_string()),
            rsi: coin.rsi.map(|d| d.to_string()),
            trend: coin.trend.as_str().to_string(),
            updated_at: format_datetime(&coin.updated_at),
        }
    }
}

impl ScreenerCoinDB {
    pub fn into_domain(self) -> Result<ScreenerCoin> {
        Ok(ScreenerCoin {
            trend: TrendLabel::parse(&self.trend)?,
            symbol: self.symbol,
            price: parse_decimal(&self.price, "screener.price"),
            change_24h_pct: parse_decimal(&self.change_24h_pct, "screener.change_24h_pct"),
            volume_24h: parse_decimal(&self.volume_24h, "screener.volume_24h"),
            high_24h: parse_decimal(&self.high_24h, "screener.high_24h"),
            low_24h: parse_decimal(&self.low_24h, "screener.low_24h"),
            open_interest: parse_decimal_opt(self.open_interest.as_deref(), "screener.open_interest"),
            funding_rate: parse_decimal_opt(self.funding_rate.as_deref(), "screener.funding_rate"),
            rsi: parse_decimal_opt(self.rsi.as_deref(), "screener.rsi"),
            updated_at: parse_datetime(&self.updated_at, "screener.updated_at"),
        })
    }
}
