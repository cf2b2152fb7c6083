//! Seed data for a fresh catalog

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::database::{
    initialize_database, operations, CatalogStore, CuisineType, GroupCategory, MainCategory,
    MealType, OrderItem,
};
use crate::utils::{CatalogSettings, Result};

/// One row per catalog table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub main_category: MainCategory,
    pub group_category: GroupCategory,
    pub cuisine_type: CuisineType,
    pub order_item: OrderItem,
}

impl SeedData {
    /// The built-in exemplar: an Italian pizza served for dinner
    pub fn exemplar() -> Self {
        let preparation_time = NaiveDate::from_ymd_opt(2023, 5, 10)
            .and_then(|d| d.and_hms_opt(12, 0, 0));

        Self {
            main_category: MainCategory {
                category_id: "1".to_string(),
                category_name: "Dish".to_string(),
            },
            group_category: GroupCategory {
                group_category_id: "1".to_string(),
                categories: vec!["1".to_string()],
            },
            cuisine_type: CuisineType {
                id: "1".to_string(),
                cusin_type: Some("Italian".to_string()),
            },
            order_item: OrderItem {
                order_item_id: "1".to_string(),
                ingredients: vec!["Tomato".to_string(), "Cheese".to_string()],
                order_id: Some("1".to_string()),
                dish_name: Some("Pizza".to_string()),
                meal_type: Some(MealType::Dinner),
                cuisine_type: Some("1".to_string()),
                dish_info: Some("Classic Italian pizza with tomato and cheese".to_string()),
                preparation_time,
                main_category: Some("1".to_string()),
                category: Some("1".to_string()),
            },
        }
    }
}

/// Insert the seed rows in dependency order within a single transaction.
///
/// Not idempotent: against an already seeded store the first insert fails with
/// [`CatalogError::DuplicateKey`](crate::utils::CatalogError::DuplicateKey) and
/// nothing is written.
pub async fn seed_catalog(store: &CatalogStore, data: &SeedData) -> Result<()> {
    let mut tx = store.pool().begin().await?;

    let result = async {
        operations::insert_main_category(&mut *tx, &data.main_category).await?;
        operations::insert_group_category(&mut *tx, &data.group_category).await?;
        operations::insert_cuisine_type(&mut *tx, &data.cuisine_type).await?;
        operations::insert_order_item(&mut *tx, &data.order_item).await?;
        Ok::<_, crate::utils::CatalogError>(())
    }
    .await;

    match result {
        Ok(()) => {
            tx.commit().await?;
            info!("Seeded catalog with order item {}", data.order_item.order_item_id);
            Ok(())
        }
        Err(e) => {
            warn!("Seeding failed, rolling back: {}", e);
            tx.rollback().await?;
            Err(e)
        }
    }
}

/// Open the store, ensure the schema and insert the exemplar rows
pub async fn bootstrap(settings: &CatalogSettings) -> Result<CatalogStore> {
    let pool = initialize_database(settings).await?;
    let store = CatalogStore::new(pool);
    seed_catalog(&store, &SeedData::exemplar()).await?;
    Ok(store)
}
