//! Strategy settings - domain model, repository trait, and service.

mod strategies_model;
mod strategies_service;
mod strategies_traits;

pub use strategies_model::{PartialTpStep, StrategySetting};
pub use strategies_service::StrategySettingService;
pub use strategies_traits::{StrategySettingRepositoryTrait, StrategySettingServiceTrait};
