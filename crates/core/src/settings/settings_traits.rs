//! Repository, propagation, and service traits for app settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{SettingChangedEvent, Settings};

#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    fn get_setting(&self, key: &str) -> Result<Option<String>>;

    /// Upserts one key-value pair.
    async fn update_setting(&self, key: &str, value: &str) -> Result<()>;
}

/// Outbound boundary to the remote preference endpoint. Best-effort: the
/// local value is already authoritative for this device when a push runs.
#[async_trait]
pub trait SettingsPusherTrait: Send + Sync {
    async fn push_setting(&self, user_id: &str, key: &str, value: &str) -> Result<()>;
}

/// Fire-and-forget broadcast to the user's other connected sessions. No
/// delivery guarantee; the transport behind it is not this crate's concern.
#[async_trait]
pub trait PeerNotifierTrait: Send + Sync {
    async fn broadcast(&self, event: SettingChangedEvent) -> Result<()>;
}

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    fn get_setting(&self, key: &str) -> Result<Option<String>>;

    /// Persists the new value locally, then propagates it to the server and
    /// the user's other sessions in the background. Only the local persist
    /// can fail this call.
    async fn change_setting(&self, user_id: &str, key: &str, new_value: &str) -> Result<()>;
}
