//! 菜单项数据模型

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::{CreateMenuItemRequest, MenuCategory, SpiceLevel};

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 展示价格，保留前端传入的字符串形式（如 "240" / "240.50"）
    pub price: String,
    pub category: MenuCategory,
    #[serde(default)]
    pub spice_level: SpiceLevel,
    #[serde(default)]
    pub is_veg: bool,
    pub available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub calories: Option<i32>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItem {
    pub fn from_request(req: CreateMenuItemRequest, now: i64) -> Self {
        Self {
            id: None,
            name: req.name,
            description: req.description,
            price: req.price,
            category: req.category,
            spice_level: req.spice_level,
            is_veg: req.is_veg,
            available: req.available,
            image_url: req.image_url,
            calories: req.calories,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_kept_verbatim() {
        let item = MenuItem::from_request(
            serde_json::from_value(serde_json::json!({
                "name": "Dal Makhani",
                "price": "240.50",
                "category": "Main Course",
                "isVeg": true
            }))
            .unwrap(),
            1,
        );
        assert_eq!(item.price, "240.50");
        assert_eq!(item.category, MenuCategory::MainCourse);
        assert!(item.available);
        assert!(item.is_veg);
        assert_eq!(item.spice_level, SpiceLevel::Mild);
        assert_eq!(item.calories, None);
    }
}
