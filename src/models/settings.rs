use serde::{Deserialize, Serialize};

/// Key/value row of the `settings` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct SettingsEntry {
    pub id: i64,
    pub key: String,
    pub value: String,
}

impl SettingsEntry {
    pub const ADMIN_PASSWORD_HASH: &'static str = "admin_password_hash";

    /// New entry for insertion; the database assigns the id.
    pub fn new(key: String, value: String) -> Self {
        Self { id: 0, key, value }
    }
}
