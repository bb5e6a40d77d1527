use std::collections::BTreeMap;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa::OpenApi;

use crate::handlers;
use crate::models::{
    ContactForm, ErrorResponse, LoginForm, LoginResponse, MessageResponse, PasswordChangeForm,
    PriceForm, PriceRecord, QuickRequestForm, ServiceForm, ServiceRecord,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::prices::list_prices,
        handlers::prices::create_price,
        handlers::prices::update_price,
        handlers::prices::delete_price,
        handlers::services::list_services,
        handlers::services::create_service,
        handlers::services::update_service,
        handlers::services::delete_service,
        handlers::auth::login_api,
        handlers::auth::logout_api,
        handlers::auth::change_password_api,
        handlers::contact::quick_request_api,
        handlers::contact::contact_api,
    ),
    components(schemas(
        PriceRecord,
        PriceForm,
        ServiceRecord,
        ServiceForm,
        LoginForm,
        LoginResponse,
        PasswordChangeForm,
        QuickRequestForm,
        ContactForm,
        MessageResponse,
        ErrorResponse,
    )),
    tags((name = "catalog", description = "Services and prices catalog"))
)]
pub struct ApiDoc;

pub fn configure_openapi(mut openapi: OpenApiSpec) -> OpenApiSpec {
    // Bearer token security scheme (HTTP Bearer type, not ApiKey)
    let mut security_schemes = BTreeMap::new();
    security_schemes.insert(
        "bearer_auth".to_string(),
        SecurityScheme::Http(
            HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .description(Some("Admin token returned by /api/login"))
                .build(),
        ),
    );

    if let Some(components) = openapi.components.as_mut() {
        components.security_schemes = security_schemes;
    }

    // Global requirement; public endpoints opt out with security()
    openapi.security = Some(vec![
        utoipa::openapi::security::SecurityRequirement::new("bearer_auth", Vec::<String>::new()),
    ]);

    openapi
}

pub fn api_doc() -> OpenApiSpec {
    configure_openapi(ApiDoc::openapi())
}
