use actix_web::{web, HttpResponse, Result};
use utoipa;

use crate::auth::{AdminClaims, JwtManager, ADMIN_SUBJECT};
use crate::models::{LoginForm, LoginResponse, MessageResponse, PasswordChangeForm, ServiceError};
use crate::services::AuthService;

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Login successful - JWT token returned in response body", body = LoginResponse),
        (status = 400, description = "Password missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    security()
)]
pub async fn login_api(
    auth_service: web::Data<AuthService>,
    jwt_manager: web::Data<JwtManager>,
    form: web::Json<LoginForm>,
) -> Result<HttpResponse, ServiceError> {
    if form.password.is_empty() {
        return Err(ServiceError::ValidationError("Password is required".to_string()));
    }

    if !auth_service.verify_password(&form.password).await? {
        tracing::warn!("Rejected admin login attempt");
        return Err(ServiceError::AuthenticationError("Invalid credentials".to_string()));
    }

    let token = jwt_manager
        .generate_token(ADMIN_SUBJECT)
        .map_err(|e| ServiceError::InternalError(format!("Failed to generate token: {}", e)))?;

    tracing::info!("Admin logged in");
    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        expires_in: jwt_manager.ttl_seconds(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse)
    ),
    security()
)]
pub async fn logout_api() -> Result<HttpResponse, ServiceError> {
    // Tokens are stateless; the client discards its copy
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/change-password",
    request_body = PasswordChangeForm,
    responses(
        (status = 200, description = "Password changed successfully", body = MessageResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated or wrong current password", body = ErrorResponse)
    )
)]
pub async fn change_password_api(
    _admin: AdminClaims,
    auth_service: web::Data<AuthService>,
    form: web::Json<PasswordChangeForm>,
) -> Result<HttpResponse, ServiceError> {
    auth_service.change_password(&form).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}
