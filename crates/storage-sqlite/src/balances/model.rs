//! Database model for balance snapshots.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use perpdesk_core::balances::BalanceSnapshot;
use perpdesk_core::errors::Result;
use perpdesk_core::partition::{AccountType, Exchange};

use crate::utils::{format_datetime, parse_datetime, parse_decimal};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::balance_snapshots)]
#[diesel(primary_key(user_id, exchange, account_type))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceSnapshotDB {
    pub user_id: String,
    pub exchange: String,
    pub account_type: String,
    pub equity: String,
    pub available: String,
    pub wallet_balance: String,
    pub unrealized_pnl: String,
    pub margin_used: String,
    pub today_pnl: String,
    pub week_pnl: String,
    pub updated_at: String,
}

impl From<BalanceSnapshot> for BalanceSnapshotDB {
    fn from(balance: BalanceSnapshot) -> Self {
        BalanceSnapshotDB {
            user_id: balance.user_id,
            exchange: balance.exchange.as_str().to_string(),
            account_type: balance.account_type.as_str().to_string(),
            equity: balance.equity.to_string(),
            available: balance.available.to_string(),
            wallet_balance: balance.wallet_balance.to_string(),
            unrealized_pnl: balance.unrealized_pnl.to_string(),
            margin_used: balance.margin_used.to_string(),
            today_pnl: balance.today_pnl.to_string(),
            week_pnl: balance.week_pnl.to_string(),
            updated_at: format_datetime(&balance.updated_at),
        }
    }
}

impl BalanceSnapshotDB {
    pub fn into_domain(self) -> Result<BalanceSnapshot> {
        Ok(BalanceSnapshot {
            exchange: Exchange::parse(&self.exchange)?,
            account_type: AccountType::parse(&self.account_type)?,
            user_id: self.user_id,
            equity: parse_decimal(&self.equity, "balance.equity"),
            available: parse_decimal(&self.available, "balance.available"),
            wallet_balance: parse_decimal(&self.wallet_balance, "balance.wallet_balance"),
            unrealized_pnl: parse_decimal(&self.unrealized_pnl, "balance.unrealized_pnl"),
            margin_used: parse_decimal(&self.margin_used, "balance.margin_used"),
            today_pnl: parse_decimal(&self.today_pnl, "balance.today_pnl"),
            week_pnl: parse_decimal(&self.week_pnl, "balance.week_pnl"),
            updated_at: parse_datetime(&self.updated_at, "balance.updated_at"),
        })
    }
}
