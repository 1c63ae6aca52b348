//! PerpDesk Core - Domain entities, services, and traits.
//!
//! This crate contains the cache and synchronization logic for the PerpDesk
//! trading client. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate; the remote trading API and the
//! peer-notification transport are likewise reached only through traits.

pub mod activity_log;
pub mod balances;
pub mod cache;
pub mod constants;
pub mod errors;
pub mod orders;
pub mod partition;
pub mod positions;
pub mod remote;
pub mod screener;
pub mod settings;
pub mod signals;
pub mod strategies;
pub mod sync;
pub mod trades;

// Re-export the partition scheme; nearly every caller needs it.
pub use partition::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
