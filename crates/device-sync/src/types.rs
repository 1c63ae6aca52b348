//! Wire types for the sync service REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use perpdesk_core::activity_log::ActivityLogRecord;
use perpdesk_core::settings::SettingChangedEvent;

/// Error body returned by the sync service on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Upload of one preference value to the user's server-side profile.
///
/// POST /api/v1/sync/settings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSettingRequest {
    pub user_id: String,
    pub key: String,
    pub value: String,
}

/// Notification relayed to the user's other connected sessions.
///
/// POST /api/v1/sync/settings/broadcast
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastSettingRequest {
    pub user_id: String,
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: String,
}

impl From<SettingChangedEvent> for BroadcastSettingRequest {
    fn from(event: SettingChangedEvent) -> Self {
        Self {
            user_id: event.user_id,
            key: event.key,
            old_value: event.old_value,
            new_value: event.new_value,
        }
    }
}

/// One audit record in an outbound batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecordPayload {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub category: String,
    pub platform: String,
    pub before_state: Option<Value>,
    pub after_state: Option<Value>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ActivityLogRecord> for AuditRecordPayload {
    fn from(record: &ActivityLogRecord) -> Self {
        Self {
            id: record.id.clone(),
            user_id: record.user_id.clone(),
            action: record.action.clone(),
            category: record.category.clone(),
            platform: record.platform.as_str().to_string(),
            before_state: record.before_state.clone(),
            after_state: record.after_state.clone(),
            message: record.message.clone(),
            created_at: record.created_at,
        }
    }
}

/// Batch upload to the central audit log. The server deduplicates on record
/// id, so redelivery after a failed acknowledgement is safe.
///
/// POST /api/v1/sync/audit/batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushAuditBatchRequest {
    pub records: Vec<AuditRecordPayload>,
}
