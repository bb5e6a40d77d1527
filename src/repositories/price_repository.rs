use crate::models::{NewPrice, PriceRecord, ServiceError};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
pub trait PriceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<PriceRecord>, ServiceError>;
    /// Inserts a row and returns the id assigned by the database.
    async fn insert(&self, price: &NewPrice) -> Result<i64, ServiceError>;
    /// Replaces every non-id column; returns the number of rows touched.
    async fn update(&self, id: i64, price: &NewPrice) -> Result<u64, ServiceError>;
    async fn delete(&self, id: i64) -> Result<u64, ServiceError>;
}

pub struct SqlitePriceRepository {
    pool: SqlitePool,
}

impl SqlitePriceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceRepository for SqlitePriceRepository {
    async fn find_all(&self) -> Result<Vec<PriceRecord>, ServiceError> {
        let rows = sqlx::query_as::<_, PriceRecord>(
            "SELECT id, service, price, time FROM prices ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert(&self, price: &NewPrice) -> Result<i64, ServiceError> {
        let result = sqlx::query("INSERT INTO prices (service, price, time) VALUES (?, ?, ?)")
            .bind(&price.service)
            .bind(price.price)
            .bind(&price.time)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, price: &NewPrice) -> Result<u64, ServiceError> {
        let result = sqlx::query("UPDATE prices SET service = ?, price = ?, time = ? WHERE id = ?")
            .bind(&price.service)
            .bind(price.price)
            .bind(&price.time)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, ServiceError> {
        let result = sqlx::query("DELETE FROM prices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
