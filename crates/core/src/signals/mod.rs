//! Trading signals - domain model, repository trait, and service.

mod signals_model;
mod signals_service;
mod signals_traits;

pub use signals_model::{Signal, SignalStatus};
pub use signals_service::SignalService;
pub use signals_traits::{SignalRepositoryTrait, SignalServiceTrait};
