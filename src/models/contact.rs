use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Choice value meaning "see the free-text field instead".
pub const OTHER_DEVICE: &str = "Other";
pub const OTHER_BRAND: &str = "Other";

/// Short quote request from the landing page.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct QuickRequestForm {
    pub device: String,
    #[serde(default)]
    pub device_other: Option<String>,
    pub brand: String,
    #[serde(default)]
    pub brand_other: Option<String>,
    pub problem: String,
    pub email: String,
}

/// Full contact form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub device: String,
    #[serde(default)]
    pub device_other: Option<String>,
    pub brand: String,
    #[serde(default)]
    pub brand_other: Option<String>,
    pub problem: String,
    #[serde(default)]
    pub call_back: bool,
}

/// Picks the free-text value when the select was left on "Other".
pub fn resolve_choice(choice: &str, other_marker: &str, other: Option<&str>) -> String {
    match other.map(str::trim) {
        Some(text) if choice == other_marker && !text.is_empty() => text.to_string(),
        _ => choice.trim().to_string(),
    }
}
