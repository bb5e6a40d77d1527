pub mod auth_service;
pub mod contact_service;
pub mod mailer;
pub mod offering_service;
pub mod price_service;

pub use auth_service::*;
pub use contact_service::*;
pub use mailer::*;
pub use offering_service::*;
pub use price_service::*;
