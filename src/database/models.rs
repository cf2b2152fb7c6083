//! Catalog record types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::CatalogError;

/// Meal time classification, stored as a single-character tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    #[serde(rename = "b")]
    Breakfast,
    #[serde(rename = "l")]
    Lunch,
    #[serde(rename = "d")]
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    /// Tag written to the `meal_type` column
    pub fn tag(&self) -> &'static str {
        match self {
            MealType::Breakfast => "b",
            MealType::Lunch => "l",
            MealType::Dinner => "d",
        }
    }

    /// Get string representation for display
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl FromStr for MealType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" => Ok(MealType::Breakfast),
            "l" => Ok(MealType::Lunch),
            "d" => Ok(MealType::Dinner),
            other => Err(CatalogError::InvalidMealType(other.to_string())),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tables of the catalog, in dependency order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTable {
    MainCategory,
    GroupCategory,
    CuisineType,
    OrderItem,
}

impl CatalogTable {
    /// Referenced tables come before the tables referencing them
    pub const ALL: [CatalogTable; 4] = [
        CatalogTable::MainCategory,
        CatalogTable::GroupCategory,
        CatalogTable::CuisineType,
        CatalogTable::OrderItem,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CatalogTable::MainCategory => "main_category",
            CatalogTable::GroupCategory => "group_category",
            CatalogTable::CuisineType => "cuisine_type",
            CatalogTable::OrderItem => "order_item",
        }
    }
}

/// Foreign keys held by an order item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderItemLink {
    CuisineType,
    MainCategory,
    GroupCategory,
}

impl OrderItemLink {
    /// Referencing column on `order_item`
    pub fn column(&self) -> &'static str {
        match self {
            OrderItemLink::CuisineType => "cuisine_type",
            OrderItemLink::MainCategory => "main_category",
            OrderItemLink::GroupCategory => "category",
        }
    }

    pub fn target(&self) -> CatalogTable {
        match self {
            OrderItemLink::CuisineType => CatalogTable::CuisineType,
            OrderItemLink::MainCategory => CatalogTable::MainCategory,
            OrderItemLink::GroupCategory => CatalogTable::GroupCategory,
        }
    }
}

/// Top-level grouping label, e.g. "Dish"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainCategory {
    pub category_id: String,
    pub category_name: String,
}

/// Named grouping over a list of category identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCategory {
    pub group_category_id: String,
    pub categories: Vec<String>,
}

/// Regional or style label for a dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuisineType {
    pub id: String,
    pub cusin_type: Option<String>,
}

/// One dish within an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: String,
    pub ingredients: Vec<String>,
    /// Opaque; there is no order table behind it
    pub order_id: Option<String>,
    #[serde(rename = "dishName")]
    pub dish_name: Option<String>,
    pub meal_type: Option<MealType>,
    pub cuisine_type: Option<String>,
    pub dish_info: Option<String>,
    pub preparation_time: Option<NaiveDateTime>,
    pub main_category: Option<String>,
    pub category: Option<String>,
}

/// Order item together with the rows its foreign keys point at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub cuisine_type_rel: Option<CuisineType>,
    pub main_category_rel: Option<MainCategory>,
    pub group_category_rel: Option<GroupCategory>,
}
