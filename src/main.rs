use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use shop_catalog::auth::JwtManager;
use shop_catalog::config::AppConfig;
use shop_catalog::database::initialize_database;
use shop_catalog::handlers;
use shop_catalog::openapi_config::api_doc;
use shop_catalog::repositories::{
    SqlitePriceRepository, SqliteServiceRepository, SqliteSettingsRepository,
};
use shop_catalog::services::{
    AuthService, ContactService, DisabledMailer, EmailJsMailer, Mailer, OfferingService,
    PriceService,
};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info,sqlx=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let config = AppConfig::from_env()?;

    let pool = initialize_database(&config.database_url).await?;

    // Initialize repositories
    let price_repository = Arc::new(SqlitePriceRepository::new(pool.clone()));
    let service_repository = Arc::new(SqliteServiceRepository::new(pool.clone()));
    let settings_repository = Arc::new(SqliteSettingsRepository::new(pool.clone()));

    // Initialize services with dependency injection
    let auth_service = web::Data::new(AuthService::new(settings_repository));
    auth_service
        .ensure_admin_password(&config.admin_default_password)
        .await?;

    let price_service = web::Data::new(PriceService::new(price_repository));
    let offering_service = web::Data::new(OfferingService::new(service_repository));

    let mailer: Arc<dyn Mailer> = match config.email.clone() {
        Some(email) => Arc::new(EmailJsMailer::new(email)),
        None => {
            tracing::warn!("EMAILJS_* variables not set, contact forms will be refused");
            Arc::new(DisabledMailer)
        }
    };
    let contact_service = web::Data::new(ContactService::new(mailer));

    let jwt_manager = web::Data::new(JwtManager::new(
        &config.jwt_secret,
        config.token_ttl_hours,
    )?);

    // Build the OpenAPI spec once, outside the factory closure
    let openapi_spec = api_doc();

    tracing::info!("Catalog server listening on http://{}", config.bind_address);
    tracing::info!("API documentation: http://{}/swagger-ui/", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(jwt_manager.clone())
            .app_data(auth_service.clone())
            .app_data(price_service.clone())
            .app_data(offering_service.clone())
            .app_data(contact_service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .wrap(Logger::default())
            .service(
                utoipa_swagger_ui::SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi_spec.clone()),
            )
            .configure(handlers::configure)
    })
    .bind(config.bind_address)?
    .run()
    .await?;

    Ok(())
}
