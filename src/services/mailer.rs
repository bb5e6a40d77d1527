//! Outbound transactional email through an EmailJS-compatible REST API.

use crate::config::EmailConfig;
use crate::models::ServiceError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Which configured template a message is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    QuickRequest,
    Contact,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, kind: MessageKind, params: Value) -> Result<(), ServiceError>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: Value,
}

pub struct EmailJsMailer {
    client: reqwest::Client,
    config: EmailConfig,
}

impl EmailJsMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn template_for(&self, kind: MessageKind) -> &str {
        match kind {
            MessageKind::QuickRequest => &self.config.template_quick,
            MessageKind::Contact => &self.config.template_contact,
        }
    }
}

#[async_trait]
impl Mailer for EmailJsMailer {
    async fn send(&self, kind: MessageKind, params: Value) -> Result<(), ServiceError> {
        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: self.template_for(kind),
            user_id: &self.config.public_key,
            access_token: self.config.private_key.as_deref(),
            template_params: params,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::DeliveryError(format!("Email service unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ServiceError::DeliveryError(format!(
                "Email service returned {}: {}",
                status, detail
            )));
        }

        tracing::info!(?kind, "Email delivered");
        Ok(())
    }
}

/// Used when no email credentials are configured; every send fails.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, kind: MessageKind, _params: Value) -> Result<(), ServiceError> {
        tracing::warn!(?kind, "Dropping message: email delivery is not configured");
        Err(ServiceError::DeliveryError(
            "Email delivery is not configured".to_string(),
        ))
    }
}
