//! Signal service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::{refresh_partition, RefreshGate, RefreshOutcome, Snapshots};
use crate::errors::Result;
use crate::partition::EntityKind;
use crate::remote::{map_signal, TradingApiTrait};
use crate::signals::{Signal, SignalRepositoryTrait, SignalServiceTrait, SignalStatus};
use crate::sync::SyncTrackerTrait;

pub struct SignalService {
    repository: Arc<dyn SignalRepositoryTrait>,
    remote: Arc<dyn TradingApiTrait>,
    tracker: Arc<dyn SyncTrackerTrait>,
    gate: Arc<RefreshGate>,
}

impl SignalService {
    pub fn new(
        repository: Arc<dyn SignalRepositoryTrait>,
        remote: Arc<dyn TradingApiTrait>,
        tracker: Arc<dyn SyncTrackerTrait>,
        gate: Arc<RefreshGate>,
    ) -> Self {
        Self {
            repository,
            remote,
            tracker,
            gate,
        }
    }
}

#[async_trait]
impl SignalServiceTrait for SignalService {
    async fn refresh(&self) -> Result<RefreshOutcome> {
        let key = EntityKind::Signal.global_sync_key();
        refresh_partition(
            &self.gate,
            self.tracker.as_ref(),
            &key,
            || async {
                let dtos = self.remote.fetch_signals().await?;
                dtos.into_iter().map(map_signal).collect()
            },
            |signals| async { self.repository.replace_all(signals).await },
        )
        .await
    }

    fn get_signals(&self) -> Result<Vec<Signal>> {
        self.repository.get_signals()
    }

    fn get_active_signals(&self) -> Result<Vec<Signal>> {
        self.repository.get_signals_by_status(SignalStatus::Active)
    }

    fn observe_signals(&self) -> Snapshots<Signal> {
        self.repository.observe_signals()
    }
}
