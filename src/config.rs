use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_EMAIL_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
/// One year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub admin_default_password: String,
    /// `None` when the email credentials are not set.
    pub email: Option<EmailConfig>,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub public_key: String,
    pub private_key: Option<String>,
    pub service_id: String,
    pub template_quick: String,
    pub template_contact: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env_or("HOST", "0.0.0.0");
        let port = env_or("PORT", "5000")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let bind_address = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

        let database_url = env_or("DATABASE_URL", "sqlite:catalog.db");

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, tokens will not survive a restart");
            use rand::Rng;
            let mut rng = rand::thread_rng();
            let bytes: [u8; 32] = rng.gen();
            use base64::Engine;
            base64::engine::general_purpose::STANDARD.encode(bytes)
        });

        let token_ttl_hours = parse_token_ttl(&env_or("TOKEN_TTL_HOURS", "24"))?;

        let admin_default_password = env_or("ADMIN_DEFAULT_PASSWORD", "admin123");

        Ok(Self {
            database_url,
            bind_address,
            jwt_secret,
            token_ttl_hours,
            admin_default_password,
            email: EmailConfig::from_env(),
        })
    }
}

impl EmailConfig {
    fn from_env() -> Option<Self> {
        let public_key = non_empty_env("EMAILJS_PUBLIC_KEY")?;
        let service_id = non_empty_env("EMAILJS_SERVICE_ID")?;

        Some(Self {
            api_url: env_or("EMAILJS_API_URL", DEFAULT_EMAIL_API_URL),
            public_key,
            private_key: non_empty_env("EMAILJS_PRIVATE_KEY"),
            service_id,
            template_quick: non_empty_env("EMAILJS_TEMPLATE_QUICK")?,
            template_contact: non_empty_env("EMAILJS_TEMPLATE_CONTACT")?,
        })
    }
}

pub fn parse_token_ttl(raw: &str) -> anyhow::Result<i64> {
    let hours = raw
        .trim()
        .parse::<i64>()
        .context("TOKEN_TTL_HOURS must be an integer")?;

    if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
        anyhow::bail!(
            "TOKEN_TTL_HOURS must be between 1 and {}, got {}",
            MAX_TOKEN_TTL_HOURS,
            hours
        );
    }

    Ok(hours)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
