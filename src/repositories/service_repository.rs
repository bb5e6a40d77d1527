use crate::models::{NewService, ServiceError, ServiceRecord};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<ServiceRecord>, ServiceError>;
    async fn insert(&self, service: &NewService) -> Result<i64, ServiceError>;
    async fn update(&self, id: i64, service: &NewService) -> Result<u64, ServiceError>;
    async fn delete(&self, id: i64) -> Result<u64, ServiceError>;
}

pub struct SqliteServiceRepository {
    pool: SqlitePool,
}

impl SqliteServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepository {
    async fn find_all(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        let rows = sqlx::query_as::<_, ServiceRecord>(
            "SELECT id, name, icon, items, price FROM services ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert(&self, service: &NewService) -> Result<i64, ServiceError> {
        let result =
            sqlx::query("INSERT INTO services (name, icon, items, price) VALUES (?, ?, ?, ?)")
                .bind(&service.name)
                .bind(&service.icon)
                .bind(&service.items)
                .bind(service.price)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, service: &NewService) -> Result<u64, ServiceError> {
        let result = sqlx::query(
            "UPDATE services SET name = ?, icon = ?, items = ?, price = ? WHERE id = ?",
        )
        .bind(&service.name)
        .bind(&service.icon)
        .bind(&service.items)
        .bind(service.price)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, ServiceError> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
