//! Settings service: local-first persistence with best-effort propagation.
//!
//! A setting change is complete once it is persisted locally. The remote push
//! and the peer broadcast run in the background; their failures are logged
//! and never surfaced, and the inconsistency window closes on the peer's
//! next full resync.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::constants::{SETTING_ACTIVE_ACCOUNT_TYPE, SETTING_ACTIVE_EXCHANGE};
use crate::errors::{Error, Result, ValidationError};
use crate::partition::{AccountType, Exchange};
use crate::settings::{
    PeerNotifierTrait, SettingChangedEvent, Settings, SettingsPusherTrait,
    SettingsRepositoryTrait, SettingsServiceTrait,
};

pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryTrait>,
    pusher: Arc<dyn SettingsPusherTrait>,
    notifier: Arc<dyn PeerNotifierTrait>,
}

impl SettingsService {
    pub fn new(
        repository: Arc<dyn SettingsRepositoryTrait>,
        pusher: Arc<dyn SettingsPusherTrait>,
        notifier: Arc<dyn PeerNotifierTrait>,
    ) -> Self {
        Self {
            repository,
            pusher,
            notifier,
        }
    }

    /// Rejects values the key cannot take, and realigns the active account
    /// type when the active exchange changes underneath it.
    async fn validate_and_persist(&self, key: &str, new_value: &str) -> Result<()> {
        match key {
            SETTING_ACTIVE_EXCHANGE => {
                let exchange = Exchange::parse(new_value)?;
                self.repository.update_setting(key, new_value).await?;

                let current = self.repository.get_settings()?;
                if !current.active_account_type.valid_for(exchange) {
                    let fallback = match exchange {
                        Exchange::Bybit => AccountType::Demo,
                        Exchange::Hyperliquid => AccountType::Mainnet,
                    };
                    debug!(
                        "active account type '{}' is not valid on '{}', falling back to '{}'",
                        current.active_account_type, exchange, fallback
                    );
                    self.repository
                        .update_setting(SETTING_ACTIVE_ACCOUNT_TYPE, fallback.as_str())
                        .await?;
                }
                Ok(())
            }
            SETTING_ACTIVE_ACCOUNT_TYPE => {
                let account_type = AccountType::parse(new_value)?;
                let current = self.repository.get_settings()?;
                if !account_type.valid_for(current.active_exchange) {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Account type '{}' is not valid for exchange '{}'",
                        account_type, current.active_exchange
                    ))));
                }
                self.repository.update_setting(key, new_value).await
            }
            _ => self.repository.update_setting(key, new_value).await,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        self.repository.get_settings()
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.repository.get_setting(key)
    }

    async fn change_setting(&self, user_id: &str, key: &str, new_value: &str) -> Result<()> {
        let old_value = self.repository.get_setting(key)?;

        // Local persist is the only step allowed to fail the call.
        self.validate_and_persist(key, new_value).await?;

        let event = SettingChangedEvent {
            user_id: user_id.to_string(),
            key: key.to_string(),
            old_value,
            new_value: new_value.to_string(),
        };

        let pusher = self.pusher.clone();
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(e) = pusher
                .push_setting(&event.user_id, &event.key, &event.new_value)
                .await
            {
                warn!("remote push of setting '{}' failed: {}", event.key, e);
            }
            let key = event.key.clone();
            if let Err(e) = notifier.broadcast(event).await {
                warn!("peer broadcast of setting '{}' failed: {}", key, e);
            }
        });

        Ok(())
    }
}
