use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use super::ClientError;
use crate::models::{
    ErrorResponse, LoginForm, LoginResponse, PasswordChangeForm, PriceForm, PriceRecord,
    ServiceForm, ServiceRecord,
};

/// Remote operations the client needs from the catalog server.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_prices(&self) -> Result<Vec<PriceRecord>, ClientError>;
    async fn list_services(&self) -> Result<Vec<ServiceRecord>, ClientError>;

    async fn create_price(&self, token: &str, form: &PriceForm) -> Result<(), ClientError>;
    async fn update_price(&self, token: &str, form: &PriceForm) -> Result<(), ClientError>;
    async fn delete_price(&self, token: &str, id: i64) -> Result<(), ClientError>;

    async fn create_service(&self, token: &str, form: &ServiceForm) -> Result<(), ClientError>;
    async fn update_service(&self, token: &str, form: &ServiceForm) -> Result<(), ClientError>;
    async fn delete_service(&self, token: &str, id: i64) -> Result<(), ClientError>;

    async fn login(&self, password: &str) -> Result<LoginResponse, ClientError>;
    async fn change_password(
        &self,
        token: &str,
        form: &PasswordChangeForm,
    ) -> Result<(), ClientError>;
}

/// [`CatalogApi`] over HTTP with `reqwest`.
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_prices(&self) -> Result<Vec<PriceRecord>, ClientError> {
        let response = self.send(self.client.get(self.url("/prices"))).await?;
        Ok(response.json().await?)
    }

    async fn list_services(&self) -> Result<Vec<ServiceRecord>, ClientError> {
        let response = self.send(self.client.get(self.url("/services"))).await?;
        Ok(response.json().await?)
    }

    async fn create_price(&self, token: &str, form: &PriceForm) -> Result<(), ClientError> {
        let request = self.client.post(self.url("/prices")).bearer_auth(token).json(form);
        self.send(request).await.map(|_| ())
    }

    async fn update_price(&self, token: &str, form: &PriceForm) -> Result<(), ClientError> {
        let request = self.client.put(self.url("/prices")).bearer_auth(token).json(form);
        self.send(request).await.map(|_| ())
    }

    async fn delete_price(&self, token: &str, id: i64) -> Result<(), ClientError> {
        let request = self
            .client
            .delete(self.url("/prices"))
            .bearer_auth(token)
            .query(&[("id", id)]);
        self.send(request).await.map(|_| ())
    }

    async fn create_service(&self, token: &str, form: &ServiceForm) -> Result<(), ClientError> {
        let request = self.client.post(self.url("/services")).bearer_auth(token).json(form);
        self.send(request).await.map(|_| ())
    }

    async fn update_service(&self, token: &str, form: &ServiceForm) -> Result<(), ClientError> {
        let request = self.client.put(self.url("/services")).bearer_auth(token).json(form);
        self.send(request).await.map(|_| ())
    }

    async fn delete_service(&self, token: &str, id: i64) -> Result<(), ClientError> {
        let request = self
            .client
            .delete(self.url("/services"))
            .bearer_auth(token)
            .query(&[("id", id)]);
        self.send(request).await.map(|_| ())
    }

    async fn login(&self, password: &str) -> Result<LoginResponse, ClientError> {
        let form = LoginForm {
            password: password.to_string(),
        };
        let response = self
            .send(self.client.post(self.url("/api/login")).json(&form))
            .await?;
        Ok(response.json().await?)
    }

    async fn change_password(
        &self,
        token: &str,
        form: &PasswordChangeForm,
    ) -> Result<(), ClientError> {
        let request = self
            .client
            .post(self.url("/api/change-password"))
            .bearer_auth(token)
            .json(form);
        self.send(request).await.map(|_| ())
    }
}
