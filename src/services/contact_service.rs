use crate::models::validation::require_text;
use crate::models::{
    resolve_choice, ContactForm, QuickRequestForm, ServiceError, OTHER_BRAND, OTHER_DEVICE,
};
use crate::services::mailer::{Mailer, MessageKind};
use serde_json::json;
use std::sync::Arc;

pub struct ContactService {
    mailer: Arc<dyn Mailer>,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    pub async fn send_quick_request(&self, form: &QuickRequestForm) -> Result<(), ServiceError> {
        let device = resolve_choice(&form.device, OTHER_DEVICE, form.device_other.as_deref());
        let brand = resolve_choice(&form.brand, OTHER_BRAND, form.brand_other.as_deref());

        let params = json!({
            "device": require_text("device", &device)?,
            "brand": require_text("brand", &brand)?,
            "problem": require_text("problem", &form.problem)?,
            "email": require_text("email", &form.email)?,
        });

        self.mailer.send(MessageKind::QuickRequest, params).await
    }

    pub async fn send_contact(&self, form: &ContactForm) -> Result<(), ServiceError> {
        let device = resolve_choice(&form.device, OTHER_DEVICE, form.device_other.as_deref());
        let brand = resolve_choice(&form.brand, OTHER_BRAND, form.brand_other.as_deref());
        let call_back = if form.call_back {
            "Yes, prefers a call"
        } else {
            "No"
        };

        let params = json!({
            "name": require_text("name", &form.name)?,
            "phone": require_text("phone", &form.phone)?,
            "email": require_text("email", &form.email)?,
            "device": require_text("device", &device)?,
            "brand": require_text("brand", &brand)?,
            "problem": require_text("problem", &form.problem)?,
            "call_back": call_back,
        });

        self.mailer.send(MessageKind::Contact, params).await
    }
}
