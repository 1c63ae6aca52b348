mod common;

use perpdesk_core::constants::{SETTING_ACTIVE_EXCHANGE, SETTING_LANGUAGE};
use perpdesk_core::partition::Exchange;
use perpdesk_core::settings::SettingsRepositoryTrait;
use perpdesk_storage_sqlite::settings::SettingsRepository;

use common::setup;

#[tokio::test]
async fn test_missing_setting_is_none_and_defaults_apply() {
    let db = setup();
    let repo = SettingsRepository::new(db.pool.clone(), db.writer.clone());

    assert!(repo.get_setting(SETTING_LANGUAGE).unwrap().is_none());

    let settings = repo.get_settings().unwrap();
    assert_eq!(settings.language, "en");
    assert_eq!(settings.active_exchange, Exchange::Bybit);
}

#[tokio::test]
async fn test_update_setting_upserts() {
    let db = setup();
    let repo = SettingsRepository::new(db.pool.clone(), db.writer.clone());

    repo.update_setting(SETTING_LANGUAGE, "de").await.unwrap();
    repo.update_setting(SETTING_LANGUAGE, "fr").await.unwrap();
    repo.update_setting(SETTING_ACTIVE_EXCHANGE, "hyperliquid")
        .await
        .unwrap();

    assert_eq!(
        repo.get_setting(SETTING_LANGUAGE).unwrap().as_deref(),
        Some("fr")
    );

    let settings = repo.get_settings().unwrap();
    assert_eq!(settings.language, "fr");
    assert_eq!(settings.active_exchange, Exchange::Hyperliquid);
}
