//! Sequence Repository
//!
//! 订单编号的单调序列。UPSERT 自增在数据库内原子完成，
//! 并发下单不会拿到重复编号。

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::OrderChannel;

use super::{BaseRepository, RepoError, RepoResult};

#[derive(Clone)]
pub struct SequenceRepository {
    base: BaseRepository,
}

#[derive(Debug, Deserialize)]
struct SequenceRow {
    value: i64,
}

impl SequenceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 原子自增指定序列并返回新值，不存在时从 1 开始
    pub async fn next_value(&self, key: &str) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("UPSERT type::thing('sequence', $key) SET value += 1 RETURN AFTER")
            .bind(("key", key.to_string()))
            .await?;
        let row: Option<SequenceRow> = result.take(0)?;
        row.map(|r| r.value)
            .ok_or_else(|| RepoError::Database("Sequence upsert returned no row".to_string()))
    }

    /// 下一个订单编号，如 QR001 / ORD042 / PRE007
    pub async fn next_order_code(&self, channel: OrderChannel) -> RepoResult<String> {
        let value = self.next_value(channel.sequence_key()).await?;
        Ok(format!("{}{:03}", channel.code_prefix(), value))
    }
}
