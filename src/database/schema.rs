//! Database schema

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

use crate::utils::{CatalogSettings, Result};

/// Open the database, creating the file if needed, and ensure the schema
pub async fn initialize_database(settings: &CatalogSettings) -> Result<Pool<Sqlite>> {
    if !settings.database_path.exists() {
        debug!("Creating database at: {:?}", settings.database_path);
    }

    let options = SqliteConnectOptions::new()
        .filename(&settings.database_path)
        .create_if_missing(true)
        .foreign_keys(true);

    // Connect to the database
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections.max(1))
        .connect_with(options)
        .await?;

    info!("Ensuring catalog schema");
    create_tables(&pool).await?;

    Ok(pool)
}

/// Create catalog tables. Safe to run against an existing schema; never inserts rows.
pub async fn create_tables(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS main_category (
            category_id TEXT PRIMARY KEY,
            category_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // categories holds a JSON array of strings
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_category (
            group_category_id TEXT PRIMARY KEY,
            categories TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cuisine_type (
            id TEXT PRIMARY KEY,
            cusin_type TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS order_item (
            order_item_id TEXT PRIMARY KEY,
            ingredients TEXT,
            order_id TEXT,
            dishName TEXT,
            meal_type TEXT CHECK (meal_type IN ('b', 'l', 'd')),
            cuisine_type TEXT,
            dish_info TEXT,
            preparation_time DATETIME,
            main_category TEXT,
            category TEXT,
            FOREIGN KEY (cuisine_type) REFERENCES cuisine_type(id),
            FOREIGN KEY (main_category) REFERENCES main_category(category_id),
            FOREIGN KEY (category) REFERENCES group_category(group_category_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Reverse lookups from each referenced table
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_order_item_cuisine_type ON order_item(cuisine_type)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_order_item_main_category ON order_item(main_category)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_order_item_category ON order_item(category)")
        .execute(pool)
        .await?;

    debug!("Catalog tables created successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::CatalogTable;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let settings = CatalogSettings::with_database(dir.path().join("schema.db"));

        let pool = initialize_database(&settings).await.unwrap();
        create_tables(&pool).await.unwrap();

        for table in CatalogTable::ALL {
            let row = sqlx::query("SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table.name())
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(row.get::<i64, _>("n"), 1, "missing table {}", table.name());
        }

        pool.close().await;
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let settings = CatalogSettings::with_database(dir.path().join("fk.db"));
        let pool = initialize_database(&settings).await.unwrap();

        let row = sqlx::query("PRAGMA foreign_keys").fetch_one(&pool).await.unwrap();
        assert_eq!(row.get::<i64, _>(0), 1);

        pool.close().await;
    }
}
