use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{require_text, validate_price};
use super::ServiceError;

/// Sentinel stored when a price entry has no time estimate.
pub const NO_TIME_ESTIMATE: &str = "N/A";

/// Row of the `prices` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct PriceRecord {
    pub id: i64,
    pub service: String,
    pub price: f64,
    pub time: String,
}

/// Body accepted by `POST /prices` and `PUT /prices`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PriceForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub service: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Validated price fields ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrice {
    pub service: String,
    pub price: f64,
    pub time: String,
}

impl PriceForm {
    pub fn validate(&self) -> Result<NewPrice, ServiceError> {
        let service = require_text("service", &self.service)?;
        let price = validate_price(self.price)?;
        let time = self
            .time
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(NO_TIME_ESTIMATE)
            .to_string();

        Ok(NewPrice {
            service,
            price,
            time,
        })
    }
}
