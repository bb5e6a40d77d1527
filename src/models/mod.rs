// Models organized by resource
pub mod auth;
pub mod contact;
pub mod errors;
pub mod price;
pub mod response;
pub mod service;
pub mod settings;
pub mod validation;

pub use auth::*;
pub use contact::*;
pub use errors::*;
pub use price::*;
pub use response::*;
pub use service::*;
pub use settings::*;
