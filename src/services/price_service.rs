use crate::models::{PriceForm, PriceRecord, ServiceError};
use crate::repositories::PriceRepository;
use std::sync::Arc;

pub struct PriceService {
    repository: Arc<dyn PriceRepository>,
}

impl PriceService {
    pub fn new(repository: Arc<dyn PriceRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<PriceRecord>, ServiceError> {
        self.repository.find_all().await
    }

    pub async fn create(&self, form: &PriceForm) -> Result<i64, ServiceError> {
        let price = form.validate()?;
        let id = self.repository.insert(&price).await?;

        tracing::info!(id, service = %price.service, "Created price entry");
        Ok(id)
    }

    /// Full replace by id. A missing row is not an error.
    pub async fn update(&self, form: &PriceForm) -> Result<(), ServiceError> {
        let id = form
            .id
            .ok_or_else(|| ServiceError::ValidationError("id is required".to_string()))?;
        let price = form.validate()?;

        let affected = self.repository.update(id, &price).await?;
        if affected == 0 {
            tracing::debug!(id, "Price update matched no rows");
        } else {
            tracing::info!(id, "Updated price entry");
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let affected = self.repository.delete(id).await?;
        tracing::info!(id, affected, "Deleted price entry");
        Ok(())
    }
}
