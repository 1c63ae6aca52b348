//! REST client for the PerpDesk sync service.
//!
//! Everything here is best-effort from the caller's point of view: local
//! state is already committed before any of these endpoints are hit.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

use perpdesk_core::activity_log::{ActivityLogRecord, AuditSinkTrait};
use perpdesk_core::settings::{PeerNotifierTrait, SettingChangedEvent, SettingsPusherTrait};

use crate::error::{DeviceSyncError, Result};
use crate::types::*;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the PerpDesk sync service API.
///
/// Holds the access token for the signed-in user; a fresh client is built
/// on login and dropped on logout.
#[derive(Debug, Clone)]
pub struct DeviceSyncClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl DeviceSyncClient {
    /// Create a new sync client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the sync API (e.g., "https://sync.perpdesk.app")
    /// * `access_token` - Bearer token for the signed-in user
    pub fn new(base_url: &str, access_token: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Create headers for an API request.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
            .map_err(|_| DeviceSyncError::auth("Invalid access token format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Sync API response ({}): {}", status, body);

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(DeviceSyncError::api(
                    status.as_u16(),
                    format!("{}: {}", error.code, error.message),
                ));
            }
            return Err(DeviceSyncError::api(
                status.as_u16(),
                format!("Request failed: {}", body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!(
                "Failed to deserialize response. Body: {}, Error: {}",
                body,
                e
            );
            DeviceSyncError::api(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    /// Upload one preference value to the user's server-side profile.
    ///
    /// POST /api/v1/sync/settings
    pub async fn push_setting(&self, req: PushSettingRequest) -> Result<SuccessResponse> {
        let url = format!("{}/api/v1/sync/settings", self.base_url);
        debug!("Pushing setting '{}' for user {}", req.key, req.user_id);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&req)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Relay a settings change to the user's other connected sessions.
    ///
    /// POST /api/v1/sync/settings/broadcast
    pub async fn broadcast_setting_change(
        &self,
        req: BroadcastSettingRequest,
    ) -> Result<SuccessResponse> {
        let url = format!("{}/api/v1/sync/settings/broadcast", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&req)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Upload a batch of audit records to the central log.
    ///
    /// POST /api/v1/sync/audit/batch
    pub async fn push_audit_batch(&self, req: PushAuditBatchRequest) -> Result<SuccessResponse> {
        let url = format!("{}/api/v1/sync/audit/batch", self.base_url);
        debug!("Pushing audit batch of {} records", req.records.len());

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&req)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}

#[async_trait]
impl SettingsPusherTrait for DeviceSyncClient {
    async fn push_setting(
        &self,
        user_id: &str,
        key: &str,
        value: &str,
    ) -> perpdesk_core::errors::Result<()> {
        DeviceSyncClient::push_setting(
            self,
            PushSettingRequest {
                user_id: user_id.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            },
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PeerNotifierTrait for DeviceSyncClient {
    async fn broadcast(&self, event: SettingChangedEvent) -> perpdesk_core::errors::Result<()> {
        self.broadcast_setting_change(event.into()).await?;
        Ok(())
    }
}

#[async_trait]
impl AuditSinkTrait for DeviceSyncClient {
    async fn push_batch(&self, records: &[ActivityLogRecord]) -> perpdesk_core::errors::Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        self.push_audit_batch(PushAuditBatchRequest {
            records: records.iter().map(AuditRecordPayload::from).collect(),
        })
        .await?;
        Ok(())
    }
}
