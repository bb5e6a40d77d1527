//! Business logic behind the `/services` resource (catalog offerings).

use crate::models::{ServiceError, ServiceForm, ServiceRecord};
use crate::repositories::ServiceRepository;
use std::sync::Arc;

pub struct OfferingService {
    repository: Arc<dyn ServiceRepository>,
}

impl OfferingService {
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        self.repository.find_all().await
    }

    pub async fn create(&self, form: &ServiceForm) -> Result<i64, ServiceError> {
        let service = form.validate()?;
        let id = self.repository.insert(&service).await?;

        tracing::info!(id, name = %service.name, "Created service entry");
        Ok(id)
    }

    pub async fn update(&self, form: &ServiceForm) -> Result<(), ServiceError> {
        let id = form
            .id
            .ok_or_else(|| ServiceError::ValidationError("id is required".to_string()))?;
        let service = form.validate()?;

        let affected = self.repository.update(id, &service).await?;
        if affected == 0 {
            tracing::debug!(id, "Service update matched no rows");
        } else {
            tracing::info!(id, "Updated service entry");
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let affected = self.repository.delete(id).await?;
        tracing::info!(id, affected, "Deleted service entry");
        Ok(())
    }
}
