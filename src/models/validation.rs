use super::ServiceError;

pub const MIN_PRICE: f64 = 0.0;
pub const MAX_PRICE: f64 = 9_999_999.0;

pub fn validate_price(price: f64) -> Result<f64, ServiceError> {
    if !price.is_finite() || !(MIN_PRICE..=MAX_PRICE).contains(&price) {
        return Err(ServiceError::ValidationError(format!(
            "price must be between {} and {}",
            MIN_PRICE, MAX_PRICE
        )));
    }
    Ok(price)
}

pub fn require_text(field: &str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::ValidationError(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}
