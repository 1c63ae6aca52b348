//! Closed-position history - domain model, repository trait, and service.

mod trades_model;
mod trades_service;
mod trades_traits;

pub use trades_model::{ExitReason, Trade};
pub use trades_service::TradeService;
pub use trades_traits::{TradeRepositoryTrait, TradeServiceTrait};

#[cfg(test)]
mod trades_model_tests;

#[cfg(test)]
mod trades_service_tests;
