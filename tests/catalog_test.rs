//! End-to-end tests of the schema and seed steps against a real SQLite file.

use meal_catalog::database::{initialize_database, CatalogStore, CatalogTable, OrderItemLink};
use meal_catalog::seed::{bootstrap, seed_catalog, SeedData};
use meal_catalog::utils::{CatalogError, CatalogSettings};
use meal_catalog::{MealType, OrderItem};
use tempfile::TempDir;

fn settings_in(dir: &TempDir) -> CatalogSettings {
    CatalogSettings::with_database(dir.path().join("meals.db"))
}

async fn empty_store(dir: &TempDir) -> CatalogStore {
    let pool = initialize_database(&settings_in(dir))
        .await
        .expect("open database");
    CatalogStore::new(pool)
}

async fn assert_counts(store: &CatalogStore, expected: i64) {
    for (table, count) in store.table_counts().await.expect("count rows") {
        assert_eq!(count, expected, "unexpected row count in {}", table.name());
    }
}

fn bare_item(id: &str) -> OrderItem {
    OrderItem {
        order_item_id: id.to_string(),
        ingredients: Vec::new(),
        order_id: None,
        dish_name: None,
        meal_type: None,
        cuisine_type: None,
        dish_info: None,
        preparation_time: None,
        main_category: None,
        category: None,
    }
}

#[tokio::test]
async fn fresh_store_gets_one_row_per_table() {
    let temp = TempDir::new().expect("temp dir");
    let store = bootstrap(&settings_in(&temp)).await.expect("bootstrap");

    assert_counts(&store, 1).await;
    store.close().await;
}

#[tokio::test]
async fn schema_step_does_not_seed() {
    let temp = TempDir::new().expect("temp dir");
    let store = empty_store(&temp).await;

    assert_counts(&store, 0).await;
    store.close().await;
}

#[tokio::test]
async fn seeded_foreign_keys_resolve() {
    let temp = TempDir::new().expect("temp dir");
    let store = bootstrap(&settings_in(&temp)).await.expect("bootstrap");

    let item = store.get_order_item("1").await.unwrap().expect("order item");

    let cuisine = item.cuisine_type.as_deref().expect("cuisine fk");
    assert!(store.get_cuisine_type(cuisine).await.unwrap().is_some());

    let main = item.main_category.as_deref().expect("main category fk");
    assert!(store.get_main_category(main).await.unwrap().is_some());

    let group = item.category.as_deref().expect("group category fk");
    assert!(store.get_group_category(group).await.unwrap().is_some());

    store.close().await;
}

#[tokio::test]
async fn pizza_scenario_with_joined_rows() {
    let temp = TempDir::new().expect("temp dir");
    let store = bootstrap(&settings_in(&temp)).await.expect("bootstrap");

    let detail = store
        .get_order_item_detail("1")
        .await
        .unwrap()
        .expect("order item detail");

    assert_eq!(detail.item.dish_name.as_deref(), Some("Pizza"));
    assert_eq!(detail.item.meal_type, Some(MealType::Dinner));
    assert_eq!(detail.item.ingredients, vec!["Tomato", "Cheese"]);
    assert_eq!(detail.item.order_id.as_deref(), Some("1"));
    assert_eq!(
        detail.item.preparation_time.map(|t| t.to_string()).as_deref(),
        Some("2023-05-10 12:00:00")
    );

    let cuisine = detail.cuisine_type_rel.expect("cuisine relation");
    assert_eq!(cuisine.cusin_type.as_deref(), Some("Italian"));
    assert_eq!(detail.main_category_rel.unwrap().category_name, "Dish");
    assert_eq!(detail.group_category_rel.unwrap().categories, vec!["1"]);

    assert!(store.get_order_item_detail("404").await.unwrap().is_none());
    store.close().await;
}

#[tokio::test]
async fn reseeding_fails_with_duplicate_key() {
    let temp = TempDir::new().expect("temp dir");
    let store = bootstrap(&settings_in(&temp)).await.expect("bootstrap");

    let err = seed_catalog(&store, &SeedData::exemplar())
        .await
        .expect_err("second seed must fail");
    assert!(
        matches!(err, CatalogError::DuplicateKey(_)),
        "expected duplicate key, got {err:?}"
    );

    assert_counts(&store, 1).await;
    store.close().await;
}

#[tokio::test]
async fn reseeding_after_reopen_fails() {
    let temp = TempDir::new().expect("temp dir");
    let settings = settings_in(&temp);
    bootstrap(&settings).await.expect("first run").close().await;

    let err = bootstrap(&settings).await.expect_err("second run must fail");
    assert!(matches!(err, CatalogError::DuplicateKey(_)));
}

#[tokio::test]
async fn missing_foreign_key_rolls_back_whole_seed() {
    let temp = TempDir::new().expect("temp dir");
    let store = empty_store(&temp).await;

    let mut data = SeedData::exemplar();
    data.order_item.cuisine_type = Some("missing".to_string());

    let err = seed_catalog(&store, &data).await.expect_err("fk must fail");
    assert!(
        matches!(err, CatalogError::ForeignKeyViolation(_)),
        "expected fk violation, got {err:?}"
    );

    assert_counts(&store, 0).await;
    store.close().await;
}

#[tokio::test]
async fn unknown_meal_type_rejected_by_store() {
    let temp = TempDir::new().expect("temp dir");
    let store = bootstrap(&settings_in(&temp)).await.expect("bootstrap");

    let item = store.get_order_item("1").await.unwrap().unwrap();
    let tag = item.meal_type.expect("meal type").tag();
    assert!(["b", "l", "d"].contains(&tag));

    let err = sqlx::query("INSERT INTO order_item (order_item_id, meal_type) VALUES ('2', 'x')")
        .execute(store.pool())
        .await
        .expect_err("check constraint");
    let err = CatalogError::from(err);
    assert!(
        matches!(err, CatalogError::CheckViolation(_)),
        "expected check violation, got {err:?}"
    );

    assert_eq!(store.count_rows(CatalogTable::OrderItem).await.unwrap(), 1);
    store.close().await;
}

#[tokio::test]
async fn sequence_columns_round_trip() {
    let temp = TempDir::new().expect("temp dir");
    let store = bootstrap(&settings_in(&temp)).await.expect("bootstrap");

    let mut item = bare_item("2");
    item.ingredients = vec![
        "Flour".to_string(),
        "Crème fraîche".to_string(),
        "Flour".to_string(),
        "\"quoted\", with comma".to_string(),
    ];
    store.insert_order_item(&item).await.unwrap();

    let group = meal_catalog::database::GroupCategory {
        group_category_id: "2".to_string(),
        categories: vec!["3".to_string(), "1".to_string(), "2".to_string()],
    };
    store.insert_group_category(&group).await.unwrap();

    assert_eq!(store.get_order_item("2").await.unwrap(), Some(item));
    assert_eq!(store.get_group_category("2").await.unwrap(), Some(group));

    let empty = bare_item("3");
    store.insert_order_item(&empty).await.unwrap();
    assert!(store.get_order_item("3").await.unwrap().unwrap().ingredients.is_empty());

    store.close().await;
}

#[tokio::test]
async fn reverse_lookup_by_foreign_key() {
    let temp = TempDir::new().expect("temp dir");
    let store = bootstrap(&settings_in(&temp)).await.expect("bootstrap");

    let mut lasagna = bare_item("2");
    lasagna.dish_name = Some("Lasagna".to_string());
    lasagna.meal_type = Some(MealType::Lunch);
    lasagna.cuisine_type = Some("1".to_string());
    store.insert_order_item(&lasagna).await.unwrap();

    let italian = store
        .order_items_for(OrderItemLink::CuisineType, "1")
        .await
        .unwrap();
    let ids: Vec<_> = italian.iter().map(|i| i.order_item_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    let dishes = store
        .order_items_for(OrderItemLink::MainCategory, "1")
        .await
        .unwrap();
    assert_eq!(dishes.len(), 1);

    let grouped = store
        .order_items_for(OrderItemLink::GroupCategory, "1")
        .await
        .unwrap();
    assert_eq!(grouped[0].dish_name.as_deref(), Some("Pizza"));

    assert!(store
        .order_items_for(OrderItemLink::CuisineType, "unknown")
        .await
        .unwrap()
        .is_empty());

    store.close().await;
}

#[tokio::test]
async fn unreachable_store_fails_before_writing() {
    let temp = TempDir::new().expect("temp dir");
    let settings =
        CatalogSettings::with_database(temp.path().join("missing").join("dir").join("meals.db"));

    let err = bootstrap(&settings).await.expect_err("open must fail");
    assert!(matches!(err, CatalogError::Database(_)), "got {err:?}");
    assert!(!settings.database_path.exists());
}
