//! Database module

pub mod models;
pub mod operations;
pub mod schema;

// Re-export for convenience
pub use models::{
    CatalogTable, CuisineType, GroupCategory, MainCategory, MealType, OrderItem, OrderItemDetail,
    OrderItemLink,
};
pub use operations::CatalogStore;
pub use schema::{create_tables, initialize_database};
