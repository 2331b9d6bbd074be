use async_trait::async_trait;
use sqlx::MySqlPool;

use super::KvStore;
use crate::error::StoreError;

/// `kv_store` table backed store. Writes are plain upserts, there is no
/// revision column to compare against.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for MySqlStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>("SELECT v FROM kv_store WHERE k = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (k, v)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE v = VALUES(v)
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let keys = sqlx::query_scalar::<_, String>("SELECT k FROM kv_store ORDER BY k")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}
