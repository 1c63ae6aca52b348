//! Outbound sync transport for PerpDesk.
//!
//! Thin REST client over the sync service, wired into the core through its
//! propagation traits (`SettingsPusherTrait`, `PeerNotifierTrait`,
//! `AuditSinkTrait`). All calls are best-effort: the local store has already
//! committed before anything here runs, and failures surface as soft
//! `FetchFailed` errors the services log and move past.

mod client;
mod error;
mod types;

pub use client::DeviceSyncClient;
pub use error::{DeviceSyncError, Result};
pub use types::{
    ApiErrorResponse, AuditRecordPayload, BroadcastSettingRequest, PushAuditBatchRequest,
    PushSettingRequest, SuccessResponse,
};
