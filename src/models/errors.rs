use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    AuthenticationError(String),
    #[error("{0}")]
    DatabaseError(String),
    #[error("{0}")]
    DeliveryError(String),
    #[error("{0}")]
    InternalError(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServiceError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            ServiceError::DeliveryError(_) => StatusCode::BAD_GATEWAY,
            ServiceError::DatabaseError(_) | ServiceError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::DatabaseError(msg) => tracing::error!("Database error: {}", msg),
            ServiceError::InternalError(msg) => tracing::error!("Internal error: {}", msg),
            ServiceError::DeliveryError(msg) => tracing::warn!("Email delivery failed: {}", msg),
            other => tracing::debug!("Request rejected: {}", other),
        }

        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

// Conversion from sqlx errors
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::DatabaseError(err.to_string())
    }
}
