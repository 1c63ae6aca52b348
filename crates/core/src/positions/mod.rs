//! Open positions - domain model, repository trait, and service.

mod positions_model;
mod positions_service;
mod positions_traits;

pub use positions_model::{Position, PositionSide};
pub use positions_service::PositionService;
pub use positions_traits::{PositionRepositoryTrait, PositionServiceTrait};
