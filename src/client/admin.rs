use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::loader::{CatalogLoader, CatalogSnapshot};
use super::store::{LocalStore, ADMIN_TOKEN_KEY};
use super::views::{encode_items, items_to_text};
use super::{CatalogApi, ClientError};
use crate::models::validation::{MAX_PRICE, MIN_PRICE};
use crate::models::{PasswordChangeForm, PriceForm, PriceRecord, ServiceForm, ServiceRecord};
use crate::services::MIN_PASSWORD_LENGTH;

/// Raw text of the price editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceFormFields {
    pub id: String,
    pub service: String,
    pub price: String,
    pub time: String,
}

/// Raw text of the service editor; `items` is one entry per line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFormFields {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub items: String,
    pub price: String,
}

/// Parses a typed price and checks it lies within the accepted range.
pub fn validate_price_input(raw: &str) -> Result<f64, ClientError> {
    let out_of_range = || {
        ClientError::Validation(format!(
            "Price must be between {} and {}",
            MIN_PRICE, MAX_PRICE
        ))
    };

    let price = raw.trim().parse::<f64>().map_err(|_| out_of_range())?;
    if !price.is_finite() || !(MIN_PRICE..=MAX_PRICE).contains(&price) {
        return Err(out_of_range());
    }
    Ok(price)
}

fn parse_id(raw: &str) -> Result<Option<i64>, ClientError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| ClientError::Validation(format!("Invalid id: {}", raw)))
}

impl PriceFormFields {
    pub fn from_record(record: &PriceRecord) -> Self {
        Self {
            id: record.id.to_string(),
            service: record.service.clone(),
            price: record.price.to_string(),
            time: record.time.clone(),
        }
    }

    pub fn to_form(&self) -> Result<PriceForm, ClientError> {
        if self.service.trim().is_empty() || self.price.trim().is_empty() {
            return Err(ClientError::Validation(
                "Fill in at least the service and the price".to_string(),
            ));
        }

        let time = match self.time.trim() {
            "" => None,
            time => Some(time.to_string()),
        };

        Ok(PriceForm {
            id: parse_id(&self.id)?,
            service: self.service.trim().to_string(),
            price: validate_price_input(&self.price)?,
            time,
        })
    }
}

impl ServiceFormFields {
    pub fn from_record(record: &ServiceRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            icon: record.icon.clone(),
            items: items_to_text(&record.items),
            price: record.price.to_string(),
        }
    }

    pub fn to_form(&self) -> Result<ServiceForm, ClientError> {
        if self.name.trim().is_empty() || self.price.trim().is_empty() {
            return Err(ClientError::Validation(
                "Fill in at least the name and the price".to_string(),
            ));
        }

        Ok(ServiceForm {
            id: parse_id(&self.id)?,
            name: self.name.trim().to_string(),
            icon: self.icon.trim().to_string(),
            items: encode_items(&self.items),
            price: validate_price_input(&self.price)?,
        })
    }
}

/// Held while a submission is in flight; a second acquire fails with
/// [`ClientError::Busy`] until this is dropped.
pub struct SubmitGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmitGuard<'a> {
    pub fn acquire(flag: &'a AtomicBool) -> Result<Self, ClientError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Admin panel logic: unlock, create/update/delete, then reload everything.
pub struct AdminController {
    api: Arc<dyn CatalogApi>,
    store: Arc<LocalStore>,
    loader: CatalogLoader,
    submitting: AtomicBool,
}

impl AdminController {
    pub fn new(api: Arc<dyn CatalogApi>, store: Arc<LocalStore>) -> Self {
        let loader = CatalogLoader::new(api.clone(), store.clone());
        Self {
            api,
            store,
            loader,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    pub fn is_unlocked(&self) -> bool {
        self.store.get(ADMIN_TOKEN_KEY).is_some()
    }

    pub async fn login(&self, password: &str) -> Result<(), ClientError> {
        if password.is_empty() {
            return Err(ClientError::Validation("Please enter the password".to_string()));
        }

        let response = self.api.login(password).await?;
        self.store.set(ADMIN_TOKEN_KEY, response.token)?;
        tracing::info!("Admin panel unlocked");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.store.remove(ADMIN_TOKEN_KEY)
    }

    pub async fn change_password(
        &self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), ClientError> {
        if new.is_empty() || confirm.is_empty() {
            return Err(ClientError::Validation("Please fill in both fields".to_string()));
        }
        if new.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ClientError::Validation(format!(
                "The password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        if new != confirm {
            return Err(ClientError::Validation("Passwords do not match".to_string()));
        }

        let token = self.token()?;
        let form = PasswordChangeForm {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        };
        let result = self.api.change_password(&token, &form).await;
        self.forget_rejected_token(result)
    }

    /// Creates the entry when the form has no id, replaces it otherwise.
    pub async fn save_price(&self, fields: &PriceFormFields) -> Result<CatalogSnapshot, ClientError> {
        let form = fields.to_form()?;
        let token = self.token()?;
        let _guard = SubmitGuard::acquire(&self.submitting)?;

        let result = match form.id {
            Some(_) => self.api.update_price(&token, &form).await,
            None => self.api.create_price(&token, &form).await,
        };
        self.forget_rejected_token(result)?;

        Ok(self.loader.load_data().await)
    }

    pub async fn save_service(
        &self,
        fields: &ServiceFormFields,
    ) -> Result<CatalogSnapshot, ClientError> {
        let form = fields.to_form()?;
        let token = self.token()?;
        let _guard = SubmitGuard::acquire(&self.submitting)?;

        let result = match form.id {
            Some(_) => self.api.update_service(&token, &form).await,
            None => self.api.create_service(&token, &form).await,
        };
        self.forget_rejected_token(result)?;

        Ok(self.loader.load_data().await)
    }

    /// Deletes after `confirm` approves the prompt. `Ok(None)` when declined.
    pub async fn delete_price<F>(
        &self,
        id: i64,
        confirm: F,
    ) -> Result<Option<CatalogSnapshot>, ClientError>
    where
        F: FnOnce(&str) -> bool,
    {
        let token = self.token()?;
        if !confirm("Delete this price?") {
            return Ok(None);
        }
        let _guard = SubmitGuard::acquire(&self.submitting)?;

        let result = self.api.delete_price(&token, id).await;
        self.forget_rejected_token(result)?;

        Ok(Some(self.loader.load_data().await))
    }

    pub async fn delete_service<F>(
        &self,
        id: i64,
        confirm: F,
    ) -> Result<Option<CatalogSnapshot>, ClientError>
    where
        F: FnOnce(&str) -> bool,
    {
        let token = self.token()?;
        if !confirm("Delete this service?") {
            return Ok(None);
        }
        let _guard = SubmitGuard::acquire(&self.submitting)?;

        let result = self.api.delete_service(&token, id).await;
        self.forget_rejected_token(result)?;

        Ok(Some(self.loader.load_data().await))
    }

    /// Editor contents for a cached price entry.
    pub fn edit_price(&self, id: i64) -> Option<PriceFormFields> {
        self.loader
            .cached()
            .prices
            .iter()
            .find(|p| p.id == id)
            .map(PriceFormFields::from_record)
    }

    /// Editor contents for a cached service entry, items one per line.
    pub fn edit_service(&self, id: i64) -> Option<ServiceFormFields> {
        self.loader
            .cached()
            .services
            .iter()
            .find(|s| s.id == id)
            .map(ServiceFormFields::from_record)
    }

    fn token(&self) -> Result<String, ClientError> {
        self.store.get(ADMIN_TOKEN_KEY).ok_or(ClientError::Locked)
    }

    // An expired or revoked token locks the panel again.
    fn forget_rejected_token(&self, result: Result<(), ClientError>) -> Result<(), ClientError> {
        if let Err(ClientError::Api { status: 401, .. }) = &result {
            tracing::warn!("Admin token rejected, locking the panel");
            self.store.remove(ADMIN_TOKEN_KEY)?;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginResponse;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    const TOKEN: &str = "test-token";

    #[derive(Default)]
    struct FakeApi {
        prices: Mutex<Vec<PriceRecord>>,
        services: Mutex<Vec<ServiceRecord>>,
        next_id: AtomicUsize,
        mutations: AtomicUsize,
        offline: AtomicBool,
    }

    impl FakeApi {
        fn check(&self, token: &str) -> Result<(), ClientError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            if token != TOKEN {
                return Err(ClientError::Api {
                    status: 401,
                    message: "Invalid token".into(),
                });
            }
            Ok(())
        }

        fn next_id(&self) -> i64 {
            self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1
        }

        fn offline(&self) -> Result<(), ClientError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "offline".into(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogApi for FakeApi {
        async fn list_prices(&self) -> Result<Vec<PriceRecord>, ClientError> {
            self.offline()?;
            Ok(self.prices.lock().unwrap().clone())
        }

        async fn list_services(&self) -> Result<Vec<ServiceRecord>, ClientError> {
            self.offline()?;
            Ok(self.services.lock().unwrap().clone())
        }

        async fn create_price(&self, token: &str, form: &PriceForm) -> Result<(), ClientError> {
            self.check(token)?;
            let id = self.next_id();
            self.prices.lock().unwrap().push(PriceRecord {
                id,
                service: form.service.clone(),
                price: form.price,
                time: form.time.clone().unwrap_or_else(|| "N/A".into()),
            });
            Ok(())
        }

        async fn update_price(&self, token: &str, form: &PriceForm) -> Result<(), ClientError> {
            self.check(token)?;
            let mut prices = self.prices.lock().unwrap();
            if let Some(row) = prices.iter_mut().find(|p| Some(p.id) == form.id) {
                row.service = form.service.clone();
                row.price = form.price;
                row.time = form.time.clone().unwrap_or_else(|| "N/A".into());
            }
            Ok(())
        }

        async fn delete_price(&self, token: &str, id: i64) -> Result<(), ClientError> {
            self.check(token)?;
            self.prices.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }

        async fn create_service(&self, token: &str, form: &ServiceForm) -> Result<(), ClientError> {
            self.check(token)?;
            let id = self.next_id();
            self.services.lock().unwrap().push(ServiceRecord {
                id,
                name: form.name.clone(),
                icon: form.icon.clone(),
                items: form.items.clone(),
                price: form.price,
            });
            Ok(())
        }

        async fn update_service(&self, token: &str, form: &ServiceForm) -> Result<(), ClientError> {
            self.check(token)?;
            let mut services = self.services.lock().unwrap();
            if let Some(row) = services.iter_mut().find(|s| Some(s.id) == form.id) {
                row.name = form.name.clone();
                row.icon = form.icon.clone();
                row.items = form.items.clone();
                row.price = form.price;
            }
            Ok(())
        }

        async fn delete_service(&self, token: &str, id: i64) -> Result<(), ClientError> {
            self.check(token)?;
            self.services.lock().unwrap().retain(|s| s.id != id);
            Ok(())
        }

        async fn login(&self, password: &str) -> Result<LoginResponse, ClientError> {
            if password == "admin123" {
                Ok(LoginResponse {
                    token: TOKEN.into(),
                    expires_in: 3600,
                })
            } else {
                Err(ClientError::Api {
                    status: 401,
                    message: "Invalid credentials".into(),
                })
            }
        }

        async fn change_password(
            &self,
            token: &str,
            _form: &PasswordChangeForm,
        ) -> Result<(), ClientError> {
            self.check(token)
        }
    }

    async fn unlocked() -> (Arc<FakeApi>, Arc<LocalStore>, AdminController) {
        let api = Arc::new(FakeApi::default());
        let store = Arc::new(LocalStore::in_memory());
        let controller = AdminController::new(api.clone(), store.clone());
        controller.login("admin123").await.unwrap();
        (api, store, controller)
    }

    fn price_fields(id: &str, service: &str, price: &str, time: &str) -> PriceFormFields {
        PriceFormFields {
            id: id.into(),
            service: service.into(),
            price: price.into(),
            time: time.into(),
        }
    }

    #[test]
    fn price_input_validation() {
        assert_eq!(validate_price_input(" 15000 ").unwrap(), 15000.0);
        assert!(validate_price_input("abc").is_err());
        assert!(validate_price_input("-1").is_err());
        assert!(validate_price_input("10000000").is_err());
        assert!(validate_price_input("NaN").is_err());
        assert!(validate_price_input("inf").is_err());
    }

    #[test]
    fn submit_guard_blocks_reentry() {
        let flag = AtomicBool::new(false);
        let guard = SubmitGuard::acquire(&flag).unwrap();
        assert!(matches!(SubmitGuard::acquire(&flag), Err(ClientError::Busy)));
        drop(guard);
        assert!(SubmitGuard::acquire(&flag).is_ok());
    }

    #[tokio::test]
    async fn wrong_password_keeps_panel_locked() {
        let api = Arc::new(FakeApi::default());
        let controller = AdminController::new(api, Arc::new(LocalStore::in_memory()));

        assert!(controller.login("nope").await.is_err());
        assert!(!controller.is_unlocked());
        assert!(matches!(
            controller
                .save_price(&price_fields("", "Screen repair", "15000", ""))
                .await,
            Err(ClientError::Locked)
        ));
    }

    #[tokio::test]
    async fn invalid_price_never_reaches_the_api() {
        let (api, _store, controller) = unlocked().await;

        for bad in ["", "abc", "-5", "10000000"] {
            let result = controller
                .save_price(&price_fields("", "Screen repair", bad, ""))
                .await;
            assert!(matches!(result, Err(ClientError::Validation(_))), "{bad}");
        }
        assert_eq!(api.mutations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_update_delete_reload_everything() {
        let (api, store, controller) = unlocked().await;

        let snapshot = controller
            .save_price(&price_fields("", "Screen repair", "15000", "2 days"))
            .await
            .unwrap();
        assert_eq!(snapshot.prices.len(), 1);
        let id = snapshot.prices[0].id;

        let mut fields = controller.edit_price(id).unwrap();
        assert_eq!(fields.service, "Screen repair");
        fields.price = "18000".into();
        let snapshot = controller.save_price(&fields).await.unwrap();
        assert_eq!(snapshot.prices[0].price, 18000.0);
        assert_eq!(snapshot.prices[0].time, "2 days");

        let cached: Vec<PriceRecord> = store.get_json("prices").unwrap();
        assert_eq!(cached, snapshot.prices);

        let declined = controller.delete_price(id, |_| false).await.unwrap();
        assert!(declined.is_none());
        assert_eq!(api.prices.lock().unwrap().len(), 1);

        let snapshot = controller.delete_price(id, |_| true).await.unwrap().unwrap();
        assert!(snapshot.prices.is_empty());
    }

    #[tokio::test]
    async fn blank_time_is_sent_as_absent() {
        let (api, _store, controller) = unlocked().await;
        controller
            .save_price(&price_fields("", "Battery", "8000", "  "))
            .await
            .unwrap();
        assert_eq!(api.prices.lock().unwrap()[0].time, "N/A");
    }

    #[tokio::test]
    async fn service_items_round_trip_through_the_editor() {
        let (_api, _store, controller) = unlocked().await;

        let fields = ServiceFormFields {
            name: "Screen repair".into(),
            icon: "📱".into(),
            items: "Original parts\n\nWarranty".into(),
            price: "15000".into(),
            ..Default::default()
        };
        let snapshot = controller.save_service(&fields).await.unwrap();
        let record = &snapshot.services[0];
        assert_eq!(record.items, r#"["Original parts","Warranty"]"#);

        let editor = controller.edit_service(record.id).unwrap();
        assert_eq!(editor.items, "Original parts\nWarranty");
        assert_eq!(editor.icon, "📱");
    }

    #[tokio::test]
    async fn rejected_token_locks_the_panel() {
        let api = Arc::new(FakeApi::default());
        let store = Arc::new(LocalStore::in_memory());
        store.set(ADMIN_TOKEN_KEY, "stale").unwrap();
        let controller = AdminController::new(api, store);

        let result = controller
            .save_price(&price_fields("", "Battery", "8000", ""))
            .await;
        assert!(matches!(result, Err(ClientError::Api { status: 401, .. })));
        assert!(!controller.is_unlocked());
    }

    #[tokio::test]
    async fn failed_load_keeps_cached_copy() {
        let (api, _store, controller) = unlocked().await;
        controller
            .save_price(&price_fields("", "Battery", "8000", ""))
            .await
            .unwrap();

        api.offline.store(true, Ordering::SeqCst);
        let snapshot = controller.loader().load_data().await;
        assert_eq!(snapshot.prices.len(), 1);
        assert!(controller.loader().refresh().await.is_err());
    }

    #[tokio::test]
    async fn password_change_is_validated_locally() {
        let (api, _store, controller) = unlocked().await;

        assert!(controller.change_password("admin123", "abc", "abc").await.is_err());
        assert!(controller
            .change_password("admin123", "secret1", "secret2")
            .await
            .is_err());
        assert_eq!(api.mutations.load(Ordering::SeqCst), 0);

        controller
            .change_password("admin123", "secret1", "secret1")
            .await
            .unwrap();
        assert_eq!(api.mutations.load(Ordering::SeqCst), 1);
    }
}
