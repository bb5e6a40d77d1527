use actix_web::{web, HttpResponse, Result};
use utoipa;

use crate::models::{ContactForm, MessageResponse, QuickRequestForm, ServiceError};
use crate::services::ContactService;

#[utoipa::path(
    post,
    path = "/api/contact/quick",
    request_body = QuickRequestForm,
    responses(
        (status = 200, description = "Quote request forwarded", body = MessageResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 502, description = "Email service failed", body = ErrorResponse)
    ),
    security()
)]
pub async fn quick_request_api(
    contact_service: web::Data<ContactService>,
    form: web::Json<QuickRequestForm>,
) -> Result<HttpResponse, ServiceError> {
    contact_service.send_quick_request(&form).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactForm,
    responses(
        (status = 200, description = "Contact message forwarded", body = MessageResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 502, description = "Email service failed", body = ErrorResponse)
    ),
    security()
)]
pub async fn contact_api(
    contact_service: web::Data<ContactService>,
    form: web::Json<ContactForm>,
) -> Result<HttpResponse, ServiceError> {
    contact_service.send_contact(&form).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}
