//! Activity log - append-only audit trail with outbound sync.

mod activity_log_model;
mod activity_log_service;
mod activity_log_traits;

pub use activity_log_model::{ActivityLogRecord, NewActivityLogRecord, SourcePlatform};
pub use activity_log_service::ActivityLogService;
pub use activity_log_traits::{ActivityLogRepositoryTrait, ActivityLogServiceTrait, AuditSinkTrait};

#[cfg(test)]
mod activity_log_service_tests;
