//! Partition key scheme.
//!
//! Every user-scoped entity is isolated under a `(user_id, exchange,
//! account_type)` partition. Data for one exchange/account combination must
//! never leak into, or be overwritten by, another; the replace-all write path
//! and the sync-metadata tracker both key on the values defined here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Supported trading venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    /// Centralized exchange with demo/real sub-accounts.
    Bybit,
    /// Decentralized exchange with testnet/mainnet sub-accounts.
    Hyperliquid,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Bybit => "bybit",
            Exchange::Hyperliquid => "hyperliquid",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "bybit" => Ok(Exchange::Bybit),
            "hyperliquid" => Ok(Exchange::Hyperliquid),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown exchange '{}'",
                other
            )))),
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-account of a single exchange. Demo/real belong to the centralized
/// venue, testnet/mainnet to the decentralized one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Demo,
    Real,
    Testnet,
    Mainnet,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Demo => "demo",
            AccountType::Real => "real",
            AccountType::Testnet => "testnet",
            AccountType::Mainnet => "mainnet",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "demo" => Ok(AccountType::Demo),
            "real" => Ok(AccountType::Real),
            "testnet" => Ok(AccountType::Testnet),
            "mainnet" => Ok(AccountType::Mainnet),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown account type '{}'",
                other
            )))),
        }
    }

    /// Whether this sub-account exists on the given exchange.
    pub fn valid_for(&self, exchange: Exchange) -> bool {
        match exchange {
            Exchange::Bybit => matches!(self, AccountType::Demo | AccountType::Real),
            Exchange::Hyperliquid => matches!(self, AccountType::Testnet | AccountType::Mainnet),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The nine persisted entity kinds. ScreenerCoin and Signal live in a single
/// implicit global partition; everything else is partition-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Position,
    Order,
    Trade,
    Balance,
    StrategySetting,
    ScreenerCoin,
    Signal,
    ActivityLog,
    SyncMetadata,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Position => "positions",
            EntityKind::Order => "orders",
            EntityKind::Trade => "trades",
            EntityKind::Balance => "balance",
            EntityKind::StrategySetting => "strategy_settings",
            EntityKind::ScreenerCoin => "screener",
            EntityKind::Signal => "signals",
            EntityKind::ActivityLog => "activity_log",
            EntityKind::SyncMetadata => "sync_metadata",
        }
    }

    /// Global kinds are shared by all users of the local store instance and
    /// refreshed on a timer rather than per-user action.
    pub fn is_global(&self) -> bool {
        matches!(self, EntityKind::ScreenerCoin | EntityKind::Signal)
    }

    /// Sync-metadata key for a global kind.
    pub fn global_sync_key(&self) -> String {
        format!("{}:global", self.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and isolation boundary for user-scoped cached data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub user_id: String,
    pub exchange: Exchange,
    pub account_type: AccountType,
}

impl Partition {
    /// Builds a partition, rejecting account types the exchange does not have
    /// (e.g., a demo sub-account on the decentralized venue).
    pub fn new(
        user_id: impl Into<String>,
        exchange: Exchange,
        account_type: AccountType,
    ) -> Result<Self> {
        if !account_type.valid_for(exchange) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Account type '{}' is not valid for exchange '{}'",
                account_type, exchange
            ))));
        }
        Ok(Partition {
            user_id: user_id.into(),
            exchange,
            account_type,
        })
    }

    /// Opaque partition key: `{user}:{exchange}:{account}`.
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.user_id, self.exchange, self.account_type)
    }

    /// Sync-metadata key for one entity kind within this partition:
    /// `{kind}:{user}:{exchange}:{account}`. Two kinds under the same
    /// partition track staleness independently.
    pub fn sync_key(&self, kind: EntityKind) -> String {
        format!("{}:{}", kind, self.key())
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
