use crate::models::{PasswordChangeForm, ServiceError, SettingsEntry};
use crate::repositories::SettingsRepository;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::Arc;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub struct AuthService {
    repository: Arc<dyn SettingsRepository>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self { repository }
    }

    /// Stores the hash of `default_password` unless an admin hash already exists.
    /// Returns whether a new hash was written.
    pub async fn ensure_admin_password(&self, default_password: &str) -> Result<bool, ServiceError> {
        if self.stored_hash().await?.is_some() {
            return Ok(false);
        }

        let hash = hash_password(default_password)?;
        self.repository
            .upsert(SettingsEntry::ADMIN_PASSWORD_HASH, &hash)
            .await?;

        tracing::info!("Admin password initialized with the configured default");
        Ok(true)
    }

    pub async fn verify_password(&self, password: &str) -> Result<bool, ServiceError> {
        let Some(hash) = self.stored_hash().await? else {
            tracing::warn!("Login attempted before the admin password was initialized");
            return Ok(false);
        };

        let parsed = PasswordHash::new(&hash)
            .map_err(|e| ServiceError::InternalError(format!("Stored password hash is invalid: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    pub async fn change_password(&self, form: &PasswordChangeForm) -> Result<(), ServiceError> {
        if form.current_password.is_empty()
            || form.new_password.is_empty()
            || form.confirm_password.is_empty()
        {
            return Err(ServiceError::ValidationError("All fields are required".to_string()));
        }

        if form.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::ValidationError(format!(
                "New password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        if form.new_password != form.confirm_password {
            return Err(ServiceError::ValidationError("New passwords do not match".to_string()));
        }

        if !self.verify_password(&form.current_password).await? {
            return Err(ServiceError::AuthenticationError(
                "Current password is incorrect".to_string(),
            ));
        }

        let hash = hash_password(&form.new_password)?;
        self.repository
            .upsert(SettingsEntry::ADMIN_PASSWORD_HASH, &hash)
            .await?;

        tracing::info!("Admin password updated");
        Ok(())
    }

    async fn stored_hash(&self) -> Result<Option<String>, ServiceError> {
        Ok(self
            .repository
            .find_by_key(SettingsEntry::ADMIN_PASSWORD_HASH)
            .await?
            .map(|entry| entry.value))
    }
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::InternalError(format!("Failed to hash password: {}", e)))
}
