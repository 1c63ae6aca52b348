//! Activity log domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{Error, Result, ValidationError};

/// Which client produced the audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePlatform {
    Android,
    Ios,
    Web,
    Server,
}

impl SourcePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePlatform::Android => "android",
            SourcePlatform::Ios => "ios",
            SourcePlatform::Web => "web",
            SourcePlatform::Server => "server",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "android" => Ok(SourcePlatform::Android),
            "ios" => Ok(SourcePlatform::Ios),
            "web" => Ok(SourcePlatform::Web),
            "server" => Ok(SourcePlatform::Server),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown source platform '{}'",
                other
            )))),
        }
    }
}

/// Append-only audit record: inserted once, never updated except for the
/// `synced` flag, and age-pruned. The flag drives outbound sync to the
/// central audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogRecord {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub category: String,
    pub platform: SourcePlatform,
    pub before_state: Option<Value>,
    pub after_state: Option<Value>,
    pub message: String,
    pub synced: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for appending a record; id, synced flag, and timestamp are
/// assigned at insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityLogRecord {
    pub user_id: String,
    pub action: String,
    pub category: String,
    pub platform: SourcePlatform,
    pub before_state: Option<Value>,
    pub after_state: Option<Value>,
    pub message: String,
}

impl NewActivityLogRecord {
    pub fn into_record(self, now: DateTime<Utc>) -> ActivityLogRecord {
        ActivityLogRecord {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id,
            action: self.action,
            category: self.category,
            platform: self.platform,
            before_state: self.before_state,
            after_state: self.after_state,
            message: self.message,
            synced: false,
            created_at: now,
        }
    }
}
