//! Balance snapshot domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::partition::{AccountType, Exchange, Partition};

/// Point-in-time projection of an account's balance. At most one row per
/// partition, overwritten on each refresh; historical balance points belong
/// to the PnL chart time series, not to this cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    pub user_id: String,
    pub exchange: Exchange,
    pub account_type: AccountType,
    pub equity: Decimal,
    pub available: Decimal,
    pub wallet_balance: Decimal,
    pub unrealized_pnl: Decimal,
    pub margin_used: Decimal,
    pub today_pnl: Decimal,
    pub week_pnl: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl BalanceSnapshot {
    pub fn partition(&self) -> Partition {
        Partition {
            user_id: self.user_id.clone(),
            exchange: self.exchange,
            account_type: self.account_type,
        }
    }
}
