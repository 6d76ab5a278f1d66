//! Feedback Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::Feedback;

use super::{BaseRepository, RepoError, RepoResult};

const TABLE: &str = "feedback";

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 一个订单编号只收一条评价，先查后插，唯一索引兜底并发
    pub async fn create(&self, feedback: Feedback) -> RepoResult<Feedback> {
        if self.find_by_order_code(&feedback.order_code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Feedback for order '{}' already submitted",
                feedback.order_code
            )));
        }

        let created: Option<Feedback> = self.base.db().create(TABLE).content(feedback).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create feedback".to_string()))
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Feedback>> {
        let feedback: Vec<Feedback> = self
            .base
            .db()
            .query("SELECT * FROM feedback ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(feedback)
    }

    pub async fn find_by_order_code(&self, order_code: &str) -> RepoResult<Option<Feedback>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM feedback WHERE orderCode = $order_code LIMIT 1")
            .bind(("order_code", order_code.to_string()))
            .await?;
        let feedback: Vec<Feedback> = result.take(0)?;
        Ok(feedback.into_iter().next())
    }
}
