//! Meal catalog library
//!
//! SQLite schema for main categories, group categories, cuisine types and order
//! items, plus the one-shot seed step that populates a fresh store.

pub mod database;
pub mod seed;
pub mod utils;

// Re-export main types for easier use
pub use database::{CatalogStore, CatalogTable, MealType, OrderItem, OrderItemDetail, OrderItemLink};
pub use seed::{bootstrap, seed_catalog, SeedData};
pub use utils::{CatalogError, CatalogSettings};
