//! Account balance snapshot - domain model, repository trait, and service.

mod balances_model;
mod balances_service;
mod balances_traits;

pub use balances_model::BalanceSnapshot;
pub use balances_service::BalanceService;
pub use balances_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
