//! Database model for activity log records.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use perpdesk_core::activity_log::{ActivityLogRecord, SourcePlatform};
use perpdesk_core::errors::Result;

use crate::utils::{format_datetime, parse_datetime};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::activity_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ActivityLogDB {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub category: String,
    pub platform: String,
    pub before_state: Option<String>,
    pub after_state: Option<String>,
    pub message: String,
    pub synced: bool,
    pub created_at: String,
}

impl From<ActivityLogRecord> for ActivityLogDB {
    fn from(record: ActivityLogRecord) -> Self {
        ActivityLogDB {
            id: record.id,
            user_id: record.user_id,
            action: record.action,
            category: record.category,
            platform: record.platform.as_str().to_string(),
            before_state: record.before_state.map(|v| v.to_string()),
            after_state: record.after_state.map(|v| v.to_string()),
            message: record.message,
            synced: record.synced,
            created_at: format_datetime(&record.created_at),
        }
    }
}

impl ActivityLogDB {
    pub fn into_domain(self) -> Result<ActivityLogRecord> {
        Ok(ActivityLogRecord {
            platform: SourcePlatform::parse(&self.platform)?,
            id: self.id,
            user_id: self.user_id,
            action: self.action,
            category: self.category,
            before_state: parse_state(self.before_state.as_deref(), "activity_log.before_state"),
            after_state: parse_state(self.after_state.as_deref(), "activity_log.after_state"),
            message: self.message,
            synced: self.synced,
            created_at: parse_datetime(&self.created_at, "activity_log.created_at"),
        })
    }
}

fn parse_state(value: Option<&str>, field_name: &str) -> Option<Value> {
    let raw = value?;
    match serde_json::from_str(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            log::error!("Failed to parse {} '{}': {}. Dropping.", field_name, raw, e);
            None
        }
    }
}
