use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::constants::{SETTING_ACTIVE_ACCOUNT_TYPE, SETTING_ACTIVE_EXCHANGE, SETTING_LANGUAGE};
use crate::errors::{Error, Result};
use crate::partition::{AccountType, Exchange};
use crate::settings::{
    AppSetting, PeerNotifierTrait, SettingChangedEvent, Settings, SettingsPusherTrait,
    SettingsRepositoryTrait, SettingsService, SettingsServiceTrait,
};

#[derive(Default)]
struct InMemorySettingsRepository {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl SettingsRepositoryTrait for InMemorySettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        let rows: Vec<AppSetting> = self
            .values
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| AppSetting {
                setting_key: k.clone(),
                setting_value: v.clone(),
            })
            .collect();
        Ok(Settings::from_rows(&rows))
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn update_setting(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

struct UnreachablePusher {
    attempts: AtomicUsize,
}

#[async_trait]
impl SettingsPusherTrait for UnreachablePusher {
    async fn push_setting(&self, _user_id: &str, _key: &str, _value: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::FetchFailed("connection refused".into()))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<SettingChangedEvent>>,
}

#[async_trait]
impl PeerNotifierTrait for RecordingNotifier {
    async fn broadcast(&self, event: SettingChangedEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

struct OkPusher;

#[async_trait]
impl SettingsPusherTrait for OkPusher {
    async fn push_setting(&self, _user_id: &str, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

fn service_with(
    repository: Arc<InMemorySettingsRepository>,
    pusher: Arc<dyn SettingsPusherTrait>,
    notifier: Arc<RecordingNotifier>,
) -> SettingsService {
    SettingsService::new(repository, pusher, notifier)
}

#[tokio::test]
async fn test_change_setting_persists_locally_when_push_unreachable() {
    let repository = Arc::new(InMemorySettingsRepository::default());
    let pusher = Arc::new(UnreachablePusher {
        attempts: AtomicUsize::new(0),
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let service = service_with(repository.clone(), pusher.clone(), notifier.clone());

    service
        .change_setting("1", SETTING_ACTIVE_EXCHANGE, "hyperliquid")
        .await
        .unwrap();

    // Local value is authoritative despite the dead endpoint.
    assert_eq!(
        service.get_settings().unwrap().active_exchange,
        Exchange::Hyperliquid
    );

    // Give the background task a moment to run.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(pusher.attempts.load(Ordering::SeqCst), 1);
    // Broadcast still goes out even when the server push failed.
    assert_eq!(notifier.events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_exchange_change_realigns_account_type() {
    let repository = Arc::new(InMemorySettingsRepository::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = service_with(repository.clone(), Arc::new(OkPusher), notifier);

    service
        .change_setting("1", SETTING_ACTIVE_ACCOUNT_TYPE, "real")
        .await
        .unwrap();
    service
        .change_setting("1", SETTING_ACTIVE_EXCHANGE, "hyperliquid")
        .await
        .unwrap();

    let settings = service.get_settings().unwrap();
    assert_eq!(settings.active_exchange, Exchange::Hyperliquid);
    assert_eq!(settings.active_account_type, AccountType::Mainnet);
}

#[tokio::test]
async fn test_invalid_account_type_for_active_exchange_rejected() {
    let repository = Arc::new(InMemorySettingsRepository::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = service_with(repository.clone(), Arc::new(OkPusher), notifier);

    // Default active exchange is bybit; testnet belongs to hyperliquid.
    let result = service
        .change_setting("1", SETTING_ACTIVE_ACCOUNT_TYPE, "testnet")
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(
        repository.get_setting(SETTING_ACTIVE_ACCOUNT_TYPE).unwrap(),
        None
    );
}

#[tokio::test]
async fn test_broadcast_carries_old_and_new_value() {
    let repository = Arc::new(InMemorySettingsRepository::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = service_with(repository.clone(), Arc::new(OkPusher), notifier.clone());

    service
        .change_setting("1", SETTING_LANGUAGE, "de")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    service
        .change_setting("1", SETTING_LANGUAGE, "fr")
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    let events = notifier.events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].old_value, None);
    assert_eq!(events[0].new_value, "de");
    assert_eq!(events[1].old_value, Some("de".to_string()));
    assert_eq!(events[1].new_value, "fr");
}

#[test]
fn test_settings_from_rows_falls_back_on_garbage() {
    let rows = vec![
        AppSetting {
            setting_key: SETTING_ACTIVE_EXCHANGE.to_string(),
            setting_value: "mtgox".to_string(),
        },
        AppSetting {
            setting_key: SETTING_LANGUAGE.to_string(),
            setting_value: "ko".to_string(),
        },
    ];
    let settings = Settings::from_rows(&rows);
    assert_eq!(settings.active_exchange, Exchange::Bybit);
    assert_eq!(settings.language, "ko");
}
