//! Order Repository
//!
//! 表名用复数 `orders`，因为 `order` 在 SurrealQL 里是保留字。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::{CookingStatus, OrderChannel, OrderStatus};

use crate::db::models::Order;

use super::{BaseRepository, RepoError, RepoResult};

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 新订单落库，编号由序列生成，唯一索引兜底
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Orders of a single channel, newest first, optionally narrowed by status
    pub async fn find_by_channel(
        &self,
        channel: OrderChannel,
        status: Option<OrderStatus>,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM orders
                    WHERE channel = $channel
                    AND ($status IS NONE OR status = $status)
                    ORDER BY createdAt DESC"#,
            )
            .bind(("channel", channel))
            .bind(("status", status))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = self.base.parse_id(id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// 按订单编号查询，顾客追踪页用
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE code = $code LIMIT 1")
            .bind(("code", code.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// 更新订单状态字段，未提供的字段保持原值
    pub async fn update_status(
        &self,
        id: &str,
        status: Option<OrderStatus>,
        cooking_status: Option<CookingStatus>,
        assigned_chef: Option<String>,
        now: i64,
    ) -> RepoResult<Order> {
        let thing = self.base.parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    status = $status OR status,
                    cookingStatus = $cooking_status OR cookingStatus,
                    assignedChef = $assigned_chef OR assignedChef,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("cooking_status", cooking_status))
            .bind(("assigned_chef", assigned_chef))
            .bind(("now", now))
            .await?;
        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Hard delete an order
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = self.base.parse_id(id)?;
        let deleted: Option<Order> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }
        Ok(true)
    }
}
