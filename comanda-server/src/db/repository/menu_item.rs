//! Menu Item Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::{MenuCategory, UpdateMenuItemRequest};

use crate::db::models::MenuItem;

use super::{BaseRepository, RepoError, RepoResult};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, item: MenuItem) -> RepoResult<MenuItem> {
        // Check duplicate name
        if self.find_by_name(&item.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Menu item '{}' already exists",
                item.name
            )));
        }

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Full menu for staff, grouped stable by category then name
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// 按分类过滤
    pub async fn find_by_category(&self, category: MenuCategory) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE category = $category ORDER BY name")
            .bind(("category", category))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing = self.base.parse_id(id)?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    pub async fn update(
        &self,
        id: &str,
        data: UpdateMenuItemRequest,
        now: i64,
    ) -> RepoResult<MenuItem> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Menu item '{}' already exists",
                new_name
            )));
        }

        let thing = self.base.parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    description = $description OR description,
                    price = $price OR price,
                    category = $category OR category,
                    spiceLevel = $spice_level OR spiceLevel,
                    isVeg = IF $has_veg THEN $is_veg ELSE isVeg END,
                    available = IF $has_available THEN $available ELSE available END,
                    imageUrl = $image_url OR imageUrl,
                    calories = IF $has_calories THEN $calories ELSE calories END,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .bind(("price", data.price))
            .bind(("category", data.category))
            .bind(("spice_level", data.spice_level))
            .bind(("has_veg", data.is_veg.is_some()))
            .bind(("is_veg", data.is_veg))
            .bind(("has_available", data.available.is_some()))
            .bind(("available", data.available))
            .bind(("image_url", data.image_url))
            .bind(("has_calories", data.calories.is_some()))
            .bind(("calories", data.calories))
            .bind(("now", now))
            .await?;
        result
            .take::<Option<MenuItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = self.base.parse_id(id)?;
        let deleted: Option<MenuItem> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
        }
        Ok(true)
    }
}
