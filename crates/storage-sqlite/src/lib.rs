//! SQLite storage implementation for PerpDesk.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `perpdesk-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor every mutation funnels through
//! - Repository implementations for all cached entity kinds
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. All other crates (`core`, `device-sync`) are database-agnostic and
//! work with traits.
//!
//! ```text
//! core (domain)        device-sync (propagation)
//!       │                      │
//!       └──────────┬───────────┘
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! Every replace-all runs as one immediate transaction on the writer actor's
//! connection: readers see the partition's previous fetch generation or the
//! new one, never a blend. After commit, the affected partition's current
//! rows are re-queried and pushed onto the snapshot bus.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod activity_log;
pub mod balances;
pub mod orders;
pub mod positions;
pub mod screener;
pub mod settings;
pub mod signals;
pub mod strategies;
pub mod sync;
pub mod trades;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from perpdesk-core for convenience
pub use perpdesk_core::errors::{DatabaseError, Error, Result};
