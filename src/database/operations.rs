//! Catalog reads and writes

use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Pool, Row, Sqlite};
use tracing::debug;

use super::models::{
    CatalogTable, CuisineType, GroupCategory, MainCategory, MealType, OrderItem, OrderItemDetail,
    OrderItemLink,
};
use crate::utils::Result;

/// Catalog store, owns the connection pool
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pool: Pool<Sqlite>,
}

impl CatalogStore {
    /// Create new catalog store
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(self) {
        self.pool.close().await;
        debug!("Catalog store closed");
    }

    pub async fn insert_main_category(&self, record: &MainCategory) -> Result<()> {
        insert_main_category(&self.pool, record).await
    }

    pub async fn insert_group_category(&self, record: &GroupCategory) -> Result<()> {
        insert_group_category(&self.pool, record).await
    }

    pub async fn insert_cuisine_type(&self, record: &CuisineType) -> Result<()> {
        insert_cuisine_type(&self.pool, record).await
    }

    pub async fn insert_order_item(&self, record: &OrderItem) -> Result<()> {
        insert_order_item(&self.pool, record).await
    }

    /// Get main category by ID
    pub async fn get_main_category(&self, category_id: &str) -> Result<Option<MainCategory>> {
        let row = sqlx::query("SELECT * FROM main_category WHERE category_id = ?")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(MainCategory {
                category_id: row.try_get("category_id")?,
                category_name: row.try_get("category_name")?,
            })),
            None => Ok(None),
        }
    }

    /// Get group category by ID
    pub async fn get_group_category(&self, group_category_id: &str) -> Result<Option<GroupCategory>> {
        let row = sqlx::query("SELECT * FROM group_category WHERE group_category_id = ?")
            .bind(group_category_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(GroupCategory {
                group_category_id: row.try_get("group_category_id")?,
                categories: decode_sequence(row.try_get("categories")?)?,
            })),
            None => Ok(None),
        }
    }

    /// Get cuisine type by ID
    pub async fn get_cuisine_type(&self, id: &str) -> Result<Option<CuisineType>> {
        let row = sqlx::query("SELECT * FROM cuisine_type WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(CuisineType {
                id: row.try_get("id")?,
                cusin_type: row.try_get("cusin_type")?,
            })),
            None => Ok(None),
        }
    }

    /// Get order item by ID
    pub async fn get_order_item(&self, order_item_id: &str) -> Result<Option<OrderItem>> {
        let row = sqlx::query("SELECT * FROM order_item WHERE order_item_id = ?")
            .bind(order_item_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_into_order_item).transpose()
    }

    /// Get order item joined with its cuisine type, main category and group category
    pub async fn get_order_item_detail(&self, order_item_id: &str) -> Result<Option<OrderItemDetail>> {
        let row = sqlx::query(
            r#"
            SELECT oi.*,
                   ct.id AS ct_id, ct.cusin_type AS ct_cusin_type,
                   mc.category_id AS mc_category_id, mc.category_name AS mc_category_name,
                   gc.group_category_id AS gc_group_category_id, gc.categories AS gc_categories
            FROM order_item oi
            LEFT JOIN cuisine_type ct ON ct.id = oi.cuisine_type
            LEFT JOIN main_category mc ON mc.category_id = oi.main_category
            LEFT JOIN group_category gc ON gc.group_category_id = oi.category
            WHERE oi.order_item_id = ?
            "#,
        )
        .bind(order_item_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item = row_into_order_item(&row)?;

        let cuisine_type_rel = row
            .try_get::<Option<String>, _>("ct_id")?
            .map(|id| -> Result<CuisineType> {
                Ok(CuisineType {
                    id,
                    cusin_type: row.try_get("ct_cusin_type")?,
                })
            })
            .transpose()?;

        let main_category_rel = row
            .try_get::<Option<String>, _>("mc_category_id")?
            .map(|category_id| -> Result<MainCategory> {
                Ok(MainCategory {
                    category_id,
                    category_name: row.try_get("mc_category_name")?,
                })
            })
            .transpose()?;

        let group_category_rel = row
            .try_get::<Option<String>, _>("gc_group_category_id")?
            .map(|group_category_id| -> Result<GroupCategory> {
                Ok(GroupCategory {
                    group_category_id,
                    categories: decode_sequence(row.try_get("gc_categories")?)?,
                })
            })
            .transpose()?;

        Ok(Some(OrderItemDetail {
            item,
            cuisine_type_rel,
            main_category_rel,
            group_category_rel,
        }))
    }

    /// Order items whose `link` column references `key`
    pub async fn order_items_for(&self, link: OrderItemLink, key: &str) -> Result<Vec<OrderItem>> {
        // Column names come from a closed enum, never from input
        let sql = format!(
            "SELECT * FROM order_item WHERE {} = ? ORDER BY order_item_id",
            link.column()
        );
        let rows = sqlx::query(&sql).bind(key).fetch_all(&self.pool).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(row_into_order_item(row)?);
        }

        debug!(
            "Found {} order items for {} {}",
            items.len(),
            link.target().name(),
            key
        );
        Ok(items)
    }

    /// Number of rows in a table
    pub async fn count_rows(&self, table: CatalogTable) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        Ok(row.try_get(0)?)
    }

    /// Row counts for every table, in dependency order
    pub async fn table_counts(&self) -> Result<Vec<(CatalogTable, i64)>> {
        let mut counts = Vec::with_capacity(CatalogTable::ALL.len());
        for table in CatalogTable::ALL {
            counts.push((table, self.count_rows(table).await?));
        }
        Ok(counts)
    }
}

/// Insert a main category. Plain insert: an existing key is an error.
pub async fn insert_main_category<'e, E>(executor: E, record: &MainCategory) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO main_category (category_id, category_name) VALUES (?, ?)")
        .bind(&record.category_id)
        .bind(&record.category_name)
        .execute(executor)
        .await?;

    debug!("Inserted main category: {}", record.category_id);
    Ok(())
}

pub async fn insert_group_category<'e, E>(executor: E, record: &GroupCategory) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let categories = encode_sequence(&record.categories)?;

    sqlx::query("INSERT INTO group_category (group_category_id, categories) VALUES (?, ?)")
        .bind(&record.group_category_id)
        .bind(categories)
        .execute(executor)
        .await?;

    debug!("Inserted group category: {}", record.group_category_id);
    Ok(())
}

pub async fn insert_cuisine_type<'e, E>(executor: E, record: &CuisineType) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO cuisine_type (id, cusin_type) VALUES (?, ?)")
        .bind(&record.id)
        .bind(&record.cusin_type)
        .execute(executor)
        .await?;

    debug!("Inserted cuisine type: {}", record.id);
    Ok(())
}

/// Insert an order item. Its foreign keys must already exist.
pub async fn insert_order_item<'e, E>(executor: E, record: &OrderItem) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let ingredients = encode_sequence(&record.ingredients)?;

    sqlx::query(
        r#"
        INSERT INTO order_item
        (order_item_id, ingredients, order_id, dishName, meal_type, cuisine_type,
         dish_info, preparation_time, main_category, category)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.order_item_id)
    .bind(ingredients)
    .bind(&record.order_id)
    .bind(&record.dish_name)
    .bind(record.meal_type.map(|m| m.tag()))
    .bind(&record.cuisine_type)
    .bind(&record.dish_info)
    .bind(record.preparation_time)
    .bind(&record.main_category)
    .bind(&record.category)
    .execute(executor)
    .await?;

    debug!("Inserted order item: {}", record.order_item_id);
    Ok(())
}

/// Sequence columns are stored as JSON arrays
fn encode_sequence(values: &[String]) -> Result<String> {
    Ok(serde_json::to_string(values)?)
}

fn decode_sequence(raw: Option<String>) -> Result<Vec<String>> {
    match raw {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Convert database row to order item
fn row_into_order_item(row: &SqliteRow) -> Result<OrderItem> {
    let meal_type = row
        .try_get::<Option<String>, _>("meal_type")?
        .map(|tag| tag.parse::<MealType>())
        .transpose()?;

    Ok(OrderItem {
        order_item_id: row.try_get("order_item_id")?,
        ingredients: decode_sequence(row.try_get("ingredients")?)?,
        order_id: row.try_get("order_id")?,
        dish_name: row.try_get("dishName")?,
        meal_type,
        cuisine_type: row.try_get("cuisine_type")?,
        dish_info: row.try_get("dish_info")?,
        preparation_time: row.try_get("preparation_time")?,
        main_category: row.try_get("main_category")?,
        category: row.try_get("category")?,
    })
}
