//! App settings and the cross-device change event.

use serde::{Deserialize, Serialize};

use crate::constants::{
    SETTING_ACTIVE_ACCOUNT_TYPE, SETTING_ACTIVE_EXCHANGE, SETTING_LANGUAGE, SETTING_TRADING_MODE,
};
use crate::partition::{AccountType, Exchange};

/// One row of the key-value settings store.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AppSetting {
    pub setting_key: String,
    pub setting_value: String,
}

/// The assembled process-wide preferences.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub language: String,
    pub active_exchange: Exchange,
    pub active_account_type: AccountType,
    pub trading_mode: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            active_exchange: Exchange::Bybit,
            active_account_type: AccountType::Demo,
            trading_mode: "manual".to_string(),
        }
    }
}

impl Settings {
    /// Reassembles the struct from raw key-value rows, falling back to
    /// defaults for missing or unparseable values.
    pub fn from_rows(rows: &[AppSetting]) -> Self {
        let mut settings = Settings::default();
        for row in rows {
            match row.setting_key.as_str() {
                SETTING_LANGUAGE => settings.language = row.setting_value.clone(),
                SETTING_ACTIVE_EXCHANGE => {
                    if let Ok(exchange) = Exchange::parse(&row.setting_value) {
                        settings.active_exchange = exchange;
                    }
                }
                SETTING_ACTIVE_ACCOUNT_TYPE => {
                    if let Ok(account_type) = AccountType::parse(&row.setting_value) {
                        settings.active_account_type = account_type;
                    }
                }
                SETTING_TRADING_MODE => settings.trading_mode = row.setting_value.clone(),
                _ => {}
            }
        }
        settings
    }
}

/// Broadcast to the user's other live sessions after a local settings change.
/// Delivery is best-effort with no ordering guarantee across peers; a peer
/// that misses the event reconciles on its next full resync.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingChangedEvent {
    pub user_id: String,
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: String,
}
