use crate::models::{ServiceError, SettingsEntry};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn find_by_key(&self, key: &str) -> Result<Option<SettingsEntry>, ServiceError>;
    /// Inserts the key or overwrites its value.
    async fn upsert(&self, key: &str, value: &str) -> Result<(), ServiceError>;
}

pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<SettingsEntry>, ServiceError> {
        let entry = sqlx::query_as::<_, SettingsEntry>(
            "SELECT id, key, value FROM settings WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        let entry = SettingsEntry::new(key.to_string(), value.to_string());

        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(&entry.key)
        .bind(&entry.value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
