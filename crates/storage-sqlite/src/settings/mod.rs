pub mod model;
pub mod repository;

pub use repository::SettingsRepository;
