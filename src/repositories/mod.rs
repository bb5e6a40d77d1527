pub mod price_repository;
pub mod service_repository;
pub mod settings_repository;

pub use price_repository::*;
pub use service_repository::*;
pub use settings_repository::*;
