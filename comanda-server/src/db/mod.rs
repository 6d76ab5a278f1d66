//! Database Module
//!
//! 三个独立的嵌入式 SurrealDB 存储，按限界上下文隔离：
//!
//! | 存储 | 内容 |
//! |------|------|
//! | admin | 员工账号 (凭据、角色) |
//! | customer | 顾客账号 |
//! | restaurant | 订单、订座、菜单、库存、反馈、序列号 |
//!
//! 每个仓储在构造时注入对应的存储句柄，跨存储查询在结构上不可能发生。
//! Schema 定义嵌入在二进制内 (`db/<store>/schemas/*.surql`)，启动时由
//! migration runner 应用。

pub mod models;
pub mod repository;

use include_dir::{Dir, include_dir};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use surrealdb_migrations::MigrationRunner;

use crate::core::Config;
use crate::utils::AppError;

static ADMIN_SCHEMAS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/db/admin");
static CUSTOMER_SCHEMAS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/db/customer");
static RESTAURANT_SCHEMAS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/db/restaurant");

/// Database service — owns the three embedded stores
#[derive(Clone)]
pub struct DbService {
    /// Staff credentials store
    pub admin: Surreal<Db>,
    /// Customer accounts store
    pub customer: Surreal<Db>,
    /// Transactional store: orders, reservations, menu, inventory, feedback
    pub restaurant: Surreal<Db>,
}

impl DbService {
    /// Open all three stores under `work_dir/database/` and apply their
    /// embedded schema definitions.
    pub async fn init(config: &Config) -> Result<Self, AppError> {
        let db_dir = config.database_dir();

        let admin = open_store(db_dir.join("admin.db"), "admin", &ADMIN_SCHEMAS).await?;
        let customer =
            open_store(db_dir.join("customer.db"), "customer", &CUSTOMER_SCHEMAS).await?;
        let restaurant =
            open_store(db_dir.join("restaurant.db"), "restaurant", &RESTAURANT_SCHEMAS).await?;

        tracing::info!("Database stores ready (admin / customer / restaurant)");

        Ok(Self {
            admin,
            customer,
            restaurant,
        })
    }

    /// Lightweight liveness probe per store
    pub async fn health(&self) -> StoreHealth {
        StoreHealth {
            admin: probe(&self.admin).await,
            customer: probe(&self.customer).await,
            restaurant: probe(&self.restaurant).await,
        }
    }
}

/// Health snapshot of the three stores
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoreHealth {
    pub admin: bool,
    pub customer: bool,
    pub restaurant: bool,
}

impl StoreHealth {
    pub fn all_ok(&self) -> bool {
        self.admin && self.customer && self.restaurant
    }
}

async fn open_store(
    path: std::path::PathBuf,
    name: &str,
    schemas: &'static Dir<'static>,
) -> Result<Surreal<Db>, AppError> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(path.as_path())
        .await
        .map_err(|e| AppError::database(format!("Failed to open {name} store: {e}")))?;

    db.use_ns("comanda")
        .use_db(name)
        .await
        .map_err(|e| AppError::database(format!("Failed to select {name} database: {e}")))?;

    MigrationRunner::new(&db)
        .load_files(schemas)
        .up()
        .await
        .map_err(|e| AppError::database(format!("Failed to apply {name} schemas: {e}")))?;

    tracing::debug!(store = name, path = %path.display(), "Store opened");
    Ok(db)
}

async fn probe(db: &Surreal<Db>) -> bool {
    db.query("RETURN 1").await.is_ok()
}
