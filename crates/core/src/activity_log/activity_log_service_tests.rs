use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::activity_log::{
    ActivityLogRecord, ActivityLogRepositoryTrait, ActivityLogService, ActivityLogServiceTrait,
    AuditSinkTrait, NewActivityLogRecord, SourcePlatform,
};
use crate::errors::{Error, Result};

#[derive(Default)]
struct InMemoryActivityLogRepository {
    records: Mutex<Vec<ActivityLogRecord>>,
}

#[async_trait]
impl ActivityLogRepositoryTrait for InMemoryActivityLogRepository {
    async fn append(&self, record: ActivityLogRecord) -> Result<()> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    fn get_recent(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityLogRecord>> {
        let mut records: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit as usize);
        Ok(records)
    }

    fn get_unsynced(&self, limit: i64) -> Result<Vec<ActivityLogRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.synced)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_synced(&self, ids: &[String]) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let mut marked = 0;
        for record in records.iter_mut() {
            if ids.contains(&record.id) && !record.synced {
                record.synced = true;
                marked += 1;
            }
        }
        Ok(marked)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.created_at >= cutoff);
        Ok(before - records.len())
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.user_id != user_id);
        Ok(before - records.len())
    }
}

struct FlakySink {
    fail: AtomicBool,
}

#[async_trait]
impl AuditSinkTrait for FlakySink {
    async fn push_batch(&self, _records: &[ActivityLogRecord]) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(Error::FetchFailed("audit endpoint unreachable".into()))
        } else {
            Ok(())
        }
    }
}

fn new_record(user_id: &str, action: &str) -> NewActivityLogRecord {
    NewActivityLogRecord {
        user_id: user_id.to_string(),
        action: action.to_string(),
        category: "settings".to_string(),
        platform: SourcePlatform::Android,
        before_state: None,
        after_state: None,
        message: format!("{} by test", action),
    }
}

#[tokio::test]
async fn test_record_assigns_id_and_unsynced_flag() {
    let repository = Arc::new(InMemoryActivityLogRepository::default());
    let service = ActivityLogService::new(
        repository.clone(),
        Arc::new(FlakySink {
            fail: AtomicBool::new(false),
        }),
    );

    let record = service.record(new_record("1", "change_language")).await.unwrap();
    assert!(!record.id.is_empty());
    assert!(!record.synced);
    assert_eq!(repository.get_unsynced(10).unwrap().len(), 1);
}

#[tokio::test]
async fn test_flush_marks_delivered_records() {
    let repository = Arc::new(InMemoryActivityLogRepository::default());
    let service = ActivityLogService::new(
        repository.clone(),
        Arc::new(FlakySink {
            fail: AtomicBool::new(false),
        }),
    );

    service.record(new_record("1", "a")).await.unwrap();
    service.record(new_record("1", "b")).await.unwrap();

    assert_eq!(service.flush_unsynced(10).await.unwrap(), 2);
    assert!(repository.get_unsynced(10).unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_flush_leaves_records_for_retry() {
    let repository = Arc::new(InMemoryActivityLogRepository::default());
    let sink = Arc::new(FlakySink {
        fail: AtomicBool::new(true),
    });
    let service = ActivityLogService::new(repository.clone(), sink.clone());

    service.record(new_record("1", "a")).await.unwrap();

    // Push fails softly; nothing is marked.
    assert_eq!(service.flush_unsynced(10).await.unwrap(), 0);
    assert_eq!(repository.get_unsynced(10).unwrap().len(), 1);

    // Endpoint recovers; the same record is delivered.
    sink.fail.store(false, Ordering::SeqCst);
    assert_eq!(service.flush_unsynced(10).await.unwrap(), 1);
}
