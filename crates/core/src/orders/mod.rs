//! Working orders - domain model, repository trait, and service.

mod orders_model;
mod orders_service;
mod orders_traits;

pub use orders_model::{Order, OrderStatus, OrderType};
pub use orders_service::OrderService;
pub use orders_traits::{OrderRepositoryTrait, OrderServiceTrait};
