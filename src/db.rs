use anyhow::{Context, Result};
use sqlx::MySqlPool;
use tracing::info;

pub async fn init_db(database_url: &str) -> Result<MySqlPool> {
    let pool = MySqlPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            k VARCHAR(255) NOT NULL PRIMARY KEY,
            v LONGTEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .context("Failed to create kv_store table")?;

    info!("kv_store table ready");

    Ok(pool)
}
