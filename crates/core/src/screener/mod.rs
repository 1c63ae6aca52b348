//! Market screener - domain model, repository trait, and service.

mod screener_model;
mod screener_service;
mod screener_traits;

pub use screener_model::{ScreenerCoin, TrendLabel};
pub use screener_service::ScreenerService;
pub use screener_traits::{ScreenerRepositoryTrait, ScreenerServiceTrait};
