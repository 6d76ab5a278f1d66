//! Menu catalog vocabulary
//!
//! Menu items are display data only; orders copy name/price by value and
//! never reference the catalog. Price travels as a string, as stored.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fixed menu categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MenuCategory {
    #[serde(rename = "Starters")]
    Starters,
    #[serde(rename = "Main Course")]
    MainCourse,
    #[serde(rename = "Desserts")]
    Desserts,
    #[serde(rename = "Beverages")]
    Beverages,
    #[serde(rename = "Breads")]
    Breads,
    #[serde(rename = "Rice")]
    Rice,
}

/// Spice indicator shown on the menu card
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpiceLevel {
    #[default]
    Mild,
    Medium,
    Hot,
}

/// Create-item request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, max = 200, message = "Item name is required"))]
    pub name: String,
    /// Price kept as a display string, stored as received
    #[validate(length(min = 1, max = 20, message = "Price is required"))]
    pub price: String,
    pub category: MenuCategory,
    #[serde(default = "default_true")]
    pub available: bool,
    #[validate(length(max = 500, message = "Description too long"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub spice_level: SpiceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
}

fn default_true() -> bool {
    true
}

/// Update request; all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MenuCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_veg: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<SpiceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
}

/// Wire view of a catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: String,
    pub category: MenuCategory,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub spice_level: SpiceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
}
