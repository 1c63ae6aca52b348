pub mod partition_model;

#[cfg(test)]
mod partition_model_tests;

pub use partition_model::{AccountType, EntityKind, Exchange, Partition};
