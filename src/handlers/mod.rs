pub mod auth;
pub mod contact;
pub mod prices;
pub mod services;

// Re-export all handler functions for easy importing
pub use auth::*;
pub use contact::*;
pub use prices::*;
pub use services::*;

use actix_web::{web, HttpResponse};

use crate::models::{ErrorResponse, ServiceError};

/// Registers every API route plus the extractor configs that turn body and
/// query failures into `{"error": ...}` responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ServiceError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ServiceError::ValidationError(err.to_string()).into()),
    )
    .service(
        web::resource("/prices")
            .route(web::get().to(list_prices))
            .route(web::post().to(create_price))
            .route(web::put().to(update_price))
            .route(web::delete().to(delete_price))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/services")
            .route(web::get().to(list_services))
            .route(web::post().to(create_service))
            .route(web::put().to(update_service))
            .route(web::delete().to(delete_service))
            .default_service(web::to(method_not_allowed)),
    )
    .route("/api/login", web::post().to(login_api))
    .route("/api/logout", web::post().to(logout_api))
    .route("/api/change-password", web::post().to(change_password_api))
    .route("/api/contact/quick", web::post().to(quick_request_api))
    .route("/api/contact", web::post().to(contact_api));
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse {
        error: "Method Not Allowed".to_string(),
    })
}
