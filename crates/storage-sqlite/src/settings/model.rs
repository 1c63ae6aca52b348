//! Database model for the key-value settings store.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use perpdesk_core::settings::AppSetting;

#[derive(Queryable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::app_settings)]
pub struct AppSettingDB {
    pub setting_key: String,
    pub setting_value: String,
}

impl From<AppSettingDB> for AppSetting {
    fn from(row: AppSettingDB) -> Self {
        AppSetting {
            setting_key: row.setting_key,
            setting_value: row.setting_value,
        }
    }
}
