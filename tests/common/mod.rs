#![allow(dead_code)]

use actix_web::{test, web, App, HttpServer};
use async_trait::async_trait;
use serde_json::Value;
use shop_catalog::{
    auth::JwtManager,
    database::run_migrations,
    handlers,
    models::ServiceError,
    repositories::{SqlitePriceRepository, SqliteServiceRepository, SqliteSettingsRepository},
    services::{AuthService, ContactService, Mailer, MessageKind, OfferingService, PriceService},
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const ADMIN_PASSWORD: &str = "admin123";

/// Mailer that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(MessageKind, Value)>>,
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, kind: MessageKind, params: Value) -> Result<(), ServiceError> {
        if self.fail {
            return Err(ServiceError::DeliveryError("provider down".to_string()));
        }
        self.sent.lock().unwrap().push((kind, params));
        Ok(())
    }
}

pub struct TestApp {
    pub pool: SqlitePool,
    pub jwt_manager: JwtManager,
    pub mailer: Arc<RecordingMailer>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_mailer(RecordingMailer::default()).await
    }

    pub async fn with_mailer(mailer: RecordingMailer) -> Self {
        // Create temporary database
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await
            .expect("Failed to create database pool");

        run_migrations(&pool).await.expect("Failed to run migrations");

        let auth_service = AuthService::new(Arc::new(SqliteSettingsRepository::new(pool.clone())));
        auth_service
            .ensure_admin_password(ADMIN_PASSWORD)
            .await
            .expect("Failed to initialize admin password");

        Self {
            pool,
            jwt_manager: JwtManager::new("test_secret_key", 1).expect("valid token lifetime"),
            mailer: Arc::new(mailer),
            temp_dir,
        }
    }

    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        build_app(self.pool.clone(), self.jwt_manager.clone(), self.mailer.clone())
    }

    /// Serves the app on an ephemeral local port and returns its base URL.
    pub fn spawn_server(&self) -> String {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
        let address = listener.local_addr().expect("Failed to read listener address");

        let pool = self.pool.clone();
        let jwt_manager = self.jwt_manager.clone();
        let mailer = self.mailer.clone();
        let server = HttpServer::new(move || {
            build_app(pool.clone(), jwt_manager.clone(), mailer.clone())
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("Failed to listen on test listener")
        .run();
        actix_web::rt::spawn(server);

        format!("http://{}", address)
    }

    pub async fn login_and_get_token(&self) -> String {
        let app = test::init_service(self.create_app()).await;

        let login_req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({ "password": ADMIN_PASSWORD }))
            .to_request();

        let resp = test::call_service(&app, login_req).await;
        let body: Value = test::read_body_json(resp).await;

        body["token"].as_str().unwrap().to_string()
    }

    pub async fn row_count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows")
    }
}

pub fn build_app(
    pool: SqlitePool,
    jwt_manager: JwtManager,
    mailer: Arc<RecordingMailer>,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let price_repository = Arc::new(SqlitePriceRepository::new(pool.clone()));
    let service_repository = Arc::new(SqliteServiceRepository::new(pool.clone()));
    let settings_repository = Arc::new(SqliteSettingsRepository::new(pool));
    let mailer: Arc<dyn Mailer> = mailer;

    App::new()
        .app_data(web::Data::new(jwt_manager))
        .app_data(web::Data::new(AuthService::new(settings_repository)))
        .app_data(web::Data::new(PriceService::new(price_repository)))
        .app_data(web::Data::new(OfferingService::new(service_repository)))
        .app_data(web::Data::new(ContactService::new(mailer)))
        .configure(handlers::configure)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
