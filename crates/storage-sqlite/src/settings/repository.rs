//! Repository for app settings.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use perpdesk_core::errors::Result;
use perpdesk_core::settings::{AppSetting, Settings, SettingsRepositoryTrait};

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::app_settings::dsl::*;

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<AppSettingDB> = app_settings.load::<AppSettingDB>(&mut conn).into_core()?;
        let rows: Vec<AppSetting> = rows.into_iter().map(AppSetting::from).collect();
        Ok(Settings::from_rows(&rows))
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        app_settings
            .filter(setting_key.eq(key))
            .select(setting_value)
            .first::<String>(&mut conn)
            .optional()
            .into_core()
    }

    async fn update_setting(&self, key: &str, value: &str) -> Result<()> {
        let row = AppSettingDB {
            setting_key: key.to_string(),
            setting_value: value.to_string(),
        };
        self.writer
            .exec(move |conn| {
                diesel::replace_into(app_settings)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }
}
