use std::sync::Arc;

use super::store::{LocalStore, PRICES_KEY, SERVICES_KEY};
use super::{CatalogApi, ClientError};
use crate::models::{PriceRecord, ServiceRecord};

/// Both collections as last seen by the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub services: Vec<ServiceRecord>,
    pub prices: Vec<PriceRecord>,
}

/// Fetches the collections and mirrors them into the local store.
pub struct CatalogLoader {
    api: Arc<dyn CatalogApi>,
    store: Arc<LocalStore>,
}

impl CatalogLoader {
    pub fn new(api: Arc<dyn CatalogApi>, store: Arc<LocalStore>) -> Self {
        Self { api, store }
    }

    /// Fetches both collections and replaces the cached copies wholesale.
    pub async fn refresh(&self) -> Result<CatalogSnapshot, ClientError> {
        let services = self.api.list_services().await?;
        let prices = self.api.list_prices().await?;

        self.store.set_json(SERVICES_KEY, &services)?;
        self.store.set_json(PRICES_KEY, &prices)?;

        Ok(CatalogSnapshot { services, prices })
    }

    /// Like [`refresh`](Self::refresh) but never fails: errors are logged and
    /// the cached snapshot (possibly empty) is returned instead.
    pub async fn load_data(&self) -> CatalogSnapshot {
        match self.refresh().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog data, showing cached copy");
                self.cached()
            }
        }
    }

    pub fn cached(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            services: self.store.get_json(SERVICES_KEY).unwrap_or_default(),
            prices: self.store.get_json(PRICES_KEY).unwrap_or_default(),
        }
    }
}
