use actix_web::{web, HttpResponse, Result};
use utoipa;

use crate::auth::AdminClaims;
use crate::models::{DeleteQuery, MessageResponse, ServiceError, ServiceForm};
use crate::services::OfferingService;

#[utoipa::path(
    get,
    path = "/services",
    responses(
        (status = 200, description = "Every service entry", body = [ServiceRecord]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    security()
)]
pub async fn list_services(
    offering_service: web::Data<OfferingService>,
) -> Result<HttpResponse, ServiceError> {
    let services = offering_service.list().await?;
    Ok(HttpResponse::Ok().json(services))
}

#[utoipa::path(
    post,
    path = "/services",
    request_body = ServiceForm,
    responses(
        (status = 200, description = "Service entry created", body = MessageResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_service(
    _admin: AdminClaims,
    offering_service: web::Data<OfferingService>,
    form: web::Json<ServiceForm>,
) -> Result<HttpResponse, ServiceError> {
    offering_service.create(&form).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}

#[utoipa::path(
    put,
    path = "/services",
    request_body = ServiceForm,
    responses(
        (status = 200, description = "Service entry replaced (or no row matched)", body = MessageResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn update_service(
    _admin: AdminClaims,
    offering_service: web::Data<OfferingService>,
    form: web::Json<ServiceForm>,
) -> Result<HttpResponse, ServiceError> {
    offering_service.update(&form).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/services",
    params(DeleteQuery),
    responses(
        (status = 200, description = "Service entry deleted (or absent)", body = MessageResponse),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn delete_service(
    _admin: AdminClaims,
    offering_service: web::Data<OfferingService>,
    query: web::Query<DeleteQuery>,
) -> Result<HttpResponse, ServiceError> {
    offering_service.delete(query.id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}
