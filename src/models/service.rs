use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{require_text, validate_price};
use super::ServiceError;

/// Row of the `services` table. `items` holds a JSON-encoded list of lines.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct ServiceRecord {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub items: String,
    pub price: f64,
}

/// Body accepted by `POST /services` and `PUT /services`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ServiceForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "empty_items")]
    pub items: String,
    pub price: f64,
}

fn empty_items() -> String {
    "[]".to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub icon: String,
    pub items: String,
    pub price: f64,
}

impl ServiceForm {
    pub fn validate(&self) -> Result<NewService, ServiceError> {
        let name = require_text("name", &self.name)?;
        let price = validate_price(self.price)?;
        let items = if self.items.trim().is_empty() {
            empty_items()
        } else {
            serde_json::from_str::<Vec<String>>(&self.items).map_err(|_| {
                ServiceError::ValidationError(
                    "items must be a JSON-encoded list of text lines".to_string(),
                )
            })?;
            self.items.clone()
        };

        Ok(NewService {
            name,
            icon: self.icon.trim().to_string(),
            items,
            price,
        })
    }
}
