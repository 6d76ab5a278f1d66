//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod customer;
pub mod feedback;
pub mod inventory;
pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod sequence;
pub mod staff_user;

pub use customer::CustomerRepository;
pub use feedback::FeedbackRepository;
pub use inventory::InventoryRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use reservation::ReservationRepository;
pub use sequence::SequenceRepository;
pub use staff_user::StaffUserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "orders:abc".parse()?;
//   - 获取表名: id.table()
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// 解析 "table:id" 字符串，解析失败归为参数校验错误
    pub fn parse_id(&self, id: &str) -> RepoResult<surrealdb::RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }
}
