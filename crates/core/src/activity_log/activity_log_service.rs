//! Activity log service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};

use crate::activity_log::{
    ActivityLogRecord, ActivityLogRepositoryTrait, ActivityLogServiceTrait, AuditSinkTrait,
    NewActivityLogRecord,
};
use crate::errors::Result;

pub struct ActivityLogService {
    repository: Arc<dyn ActivityLogRepositoryTrait>,
    audit_sink: Arc<dyn AuditSinkTrait>,
}

impl ActivityLogService {
    pub fn new(
        repository: Arc<dyn ActivityLogRepositoryTrait>,
        audit_sink: Arc<dyn AuditSinkTrait>,
    ) -> Self {
        Self {
            repository,
            audit_sink,
        }
    }
}

#[async_trait]
impl ActivityLogServiceTrait for ActivityLogService {
    async fn record(&self, new_record: NewActivityLogRecord) -> Result<ActivityLogRecord> {
        let record = new_record.into_record(Utc::now());
        self.repository.append(record.clone()).await?;
        Ok(record)
    }

    fn get_recent(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityLogRecord>> {
        self.repository.get_recent(user_id, limit)
    }

    async fn flush_unsynced(&self, batch_size: i64) -> Result<usize> {
        let batch = self.repository.get_unsynced(batch_size)?;
        if batch.is_empty() {
            return Ok(0);
        }

        if let Err(e) = self.audit_sink.push_batch(&batch).await {
            // Leave the batch unsynced; the next flush retries it.
            warn!("audit push of {} records failed: {}", batch.len(), e);
            return Ok(0);
        }

        let ids: Vec<String> = batch.iter().map(|record| record.id.clone()).collect();
        let marked = self.repository.mark_synced(&ids).await?;
        debug!("flushed {} audit records", marked);
        Ok(marked)
    }
}
