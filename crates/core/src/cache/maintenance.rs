//! Cache lifecycle maintenance: logout purge and age-based retention.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::info;

use crate::errors::Result;

/// Implemented by every user-scoped repository so that logout can remove all
/// of a user's cached rows in one pass.
#[async_trait]
pub trait PurgeUserData: Send + Sync {
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize>;
}

/// Implemented by append-mostly kinds (Trade, Signal, ActivityLog) that are
/// retained for a bounded window and pruned by age.
#[async_trait]
pub trait PruneByAge: Send + Sync {
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}

/// Runs purge and retention passes across the registered repositories.
pub struct MaintenanceService {
    purgeable: Vec<Arc<dyn PurgeUserData>>,
    prunable: Vec<(Arc<dyn PruneByAge>, i64)>,
}

impl MaintenanceService {
    pub fn new() -> Self {
        Self {
            purgeable: Vec::new(),
            prunable: Vec::new(),
        }
    }

    pub fn register_purgeable(mut self, repo: Arc<dyn PurgeUserData>) -> Self {
        self.purgeable.push(repo);
        self
    }

    pub fn register_prunable(mut self, repo: Arc<dyn PruneByAge>, retention_days: i64) -> Self {
        self.prunable.push((repo, retention_days));
        self
    }

    /// Deletes every cached row owned by the user across all registered
    /// repositories. Used on logout; partitions of other users are untouched.
    pub async fn purge_user(&self, user_id: &str) -> Result<usize> {
        let mut total = 0;
        for repo in &self.purgeable {
            total += repo.delete_all_for_user(user_id).await?;
        }
        info!("purged {} cached rows for user {}", total, user_id);
        Ok(total)
    }

    /// Applies each repository's retention window relative to `now`.
    pub async fn prune(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut total = 0;
        for (repo, retention_days) in &self.prunable {
            let cutoff = now - Duration::days(*retention_days);
            total += repo.delete_older_than(cutoff).await?;
        }
        if total > 0 {
            info!("retention pruning removed {} rows", total);
        }
        Ok(total)
    }
}

impl Default for MaintenanceService {
    fn default() -> Self {
        Self::new()
    }
}
