//! Staleness / sync-metadata tracking.

mod sync_model;
mod sync_traits;

pub use sync_model::SyncMetadata;
pub use sync_traits::SyncTrackerTrait;
