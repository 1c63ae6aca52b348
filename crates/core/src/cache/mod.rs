//! Cache coordination: serialized refresh-and-replace, reactive snapshots,
//! and retention maintenance.

mod maintenance;
mod refresh;
mod snapshot_bus;

pub use maintenance::{MaintenanceService, PruneByAge, PurgeUserData};
pub use refresh::{refresh_partition, RefreshGate, RefreshOutcome};
pub use snapshot_bus::{SnapshotBus, Snapshots};

#[cfg(test)]
mod refresh_tests;
