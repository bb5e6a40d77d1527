use actix_web::{web, HttpResponse, Result};
use utoipa;

use crate::auth::AdminClaims;
use crate::models::{DeleteQuery, MessageResponse, PriceForm, ServiceError};
use crate::services::PriceService;

#[utoipa::path(
    get,
    path = "/prices",
    responses(
        (status = 200, description = "Every price entry", body = [PriceRecord]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    security()
)]
pub async fn list_prices(
    price_service: web::Data<PriceService>,
) -> Result<HttpResponse, ServiceError> {
    let prices = price_service.list().await?;
    Ok(HttpResponse::Ok().json(prices))
}

#[utoipa::path(
    post,
    path = "/prices",
    request_body = PriceForm,
    responses(
        (status = 200, description = "Price entry created", body = MessageResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_price(
    _admin: AdminClaims,
    price_service: web::Data<PriceService>,
    form: web::Json<PriceForm>,
) -> Result<HttpResponse, ServiceError> {
    price_service.create(&form).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}

#[utoipa::path(
    put,
    path = "/prices",
    request_body = PriceForm,
    responses(
        (status = 200, description = "Price entry replaced (or no row matched)", body = MessageResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn update_price(
    _admin: AdminClaims,
    price_service: web::Data<PriceService>,
    form: web::Json<PriceForm>,
) -> Result<HttpResponse, ServiceError> {
    price_service.update(&form).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/prices",
    params(DeleteQuery),
    responses(
        (status = 200, description = "Price entry deleted (or absent)", body = MessageResponse),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn delete_price(
    _admin: AdminClaims,
    price_service: web::Data<PriceService>,
    query: web::Query<DeleteQuery>,
) -> Result<HttpResponse, ServiceError> {
    price_service.delete(query.id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok()))
}
