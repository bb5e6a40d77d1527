//! Client-side controller for the catalog: a persistent local cache, the
//! public catalog view models and the admin panel logic, talking to the
//! server through [`CatalogApi`].

pub mod admin;
pub mod api;
pub mod loader;
pub mod store;
pub mod views;

pub use admin::*;
pub use api::*;
pub use loader::*;
pub use store::*;
pub use views::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),
    #[error("a submission is already in progress")]
    Busy,
    #[error("the admin panel is locked")]
    Locked,
    #[error("server responded {status}: {message}")]
    Api { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("local store error: {0}")]
    Store(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
