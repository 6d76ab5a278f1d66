//! Inventory Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::InventoryItem;

use super::{BaseRepository, RepoError, RepoResult};

const TABLE: &str = "inventory";

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, item: InventoryItem) -> RepoResult<InventoryItem> {
        // Check duplicate name
        if self.find_by_name(&item.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Inventory item '{}' already exists",
                item.name
            )));
        }

        let created: Option<InventoryItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory item".to_string()))
    }

    pub async fn find_all(&self) -> RepoResult<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = self
            .base
            .db()
            .query("SELECT * FROM inventory ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<InventoryItem>> {
        let thing = self.base.parse_id(id)?;
        let item: Option<InventoryItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<InventoryItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM inventory WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let items: Vec<InventoryItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// 写回整条记录，调用方已在内存里改好数量并重新推导了状态
    pub async fn save(&self, item: &InventoryItem, now: i64) -> RepoResult<InventoryItem> {
        let id = item
            .id_string()
            .ok_or_else(|| RepoError::Validation("Inventory item has no id".to_string()))?;
        let thing = self.base.parse_id(&id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name,
                    quantity = $quantity,
                    unit = $unit,
                    minStock = $min_stock,
                    status = $status,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", item.name.clone()))
            .bind(("quantity", item.quantity))
            .bind(("unit", item.unit.clone()))
            .bind(("min_stock", item.min_stock))
            .bind(("status", item.status))
            .bind(("now", now))
            .await?;
        result
            .take::<Option<InventoryItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))
    }

    /// Hard delete an inventory item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = self.base.parse_id(id)?;
        let deleted: Option<InventoryItem> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!(
                "Inventory item {} not found",
                id
            )));
        }
        Ok(true)
    }
}
