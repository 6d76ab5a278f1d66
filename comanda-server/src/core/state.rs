use std::sync::Arc;

use socketioxide::layer::SocketIoLayer;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio_util::sync::CancellationToken;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    OrderRepository, ReservationRepository, SequenceRepository, StaffUserRepository,
};
use crate::notify::Notifier;
use crate::orders::OrderLifecycle;
use crate::realtime::RelayService;
use crate::reservations::ReservationService;
use crate::utils::AppResult;
use crate::utils::time::now_millis;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是平台服务端的核心数据结构，持有所有服务的共享引用。
/// 内部组件均为浅拷贝 (Arc / 连接句柄)，Clone 成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | 三个嵌入式存储 (admin / customer / restaurant) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | relay | RelayService | Socket.IO 房间推送 |
/// | notifier | Notifier | Webhook 通知 (best-effort) |
/// | orders | OrderLifecycle | 三渠道订单生命周期 |
/// | reservations | ReservationService | 订座与冲突检测 |
/// | socket_layer | SocketIoLayer | Socket.IO 的 tower 层，挂在认证中间件之外 |
/// | shutdown | CancellationToken | 优雅停机信号 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: DbService,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// Socket.IO 推送服务
    pub relay: RelayService,
    /// Webhook 通知出口
    pub notifier: Notifier,
    /// 订单生命周期服务
    pub orders: OrderLifecycle,
    /// 订座服务
    pub reservations: ReservationService,
    /// Socket.IO tower 层 (由 Server 挂载到 Router 上)
    pub socket_layer: SocketIoLayer,
    /// 优雅停机信号
    pub shutdown: CancellationToken,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 三个数据库存储 (work_dir/database/{admin,customer,restaurant}.db)
    /// 3. 各服务 (JWT, Relay, Notifier, Orders, Reservations)
    /// 4. 默认管理员账号 (不存在时创建)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        // 0. Ensure work_dir structure exists
        config.ensure_work_dir_structure().map_err(|e| {
            crate::utils::AppError::internal(format!(
                "Failed to create work directory structure: {e}"
            ))
        })?;

        // 1. Initialize the three stores
        let db = DbService::init(config).await?;

        // 2. Initialize services
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let (relay, socket_layer) = RelayService::new();
        let notifier = Notifier::new(config.notify_webhook_url.clone())?;

        let orders = OrderLifecycle::new(
            OrderRepository::new(db.restaurant.clone()),
            SequenceRepository::new(db.restaurant.clone()),
            relay.clone(),
            notifier.clone(),
        );
        let reservations = ReservationService::new(
            ReservationRepository::new(db.restaurant.clone()),
            config.timezone,
        );

        // 3. Seed the default admin account on first boot
        let staff = StaffUserRepository::new(db.admin.clone());
        if let Some(admin) = staff
            .ensure_seed_admin(&config.admin_username, &config.admin_password, now_millis())
            .await?
        {
            tracing::info!(username = %admin.username, "Seeded default admin account");
            if config.is_production() && config.admin_password == "admin123" {
                tracing::warn!(
                    "Default admin password in production, set ADMIN_PASSWORD to override"
                );
            }
        }

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            relay,
            notifier,
            orders,
            reservations,
            socket_layer,
            shutdown: CancellationToken::new(),
        })
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 员工账号存储句柄
    pub fn admin_db(&self) -> Surreal<Db> {
        self.db.admin.clone()
    }

    /// 顾客账号存储句柄
    pub fn customer_db(&self) -> Surreal<Db> {
        self.db.customer.clone()
    }

    /// 业务数据存储句柄 (订单、订座、菜单、库存、反馈)
    pub fn restaurant_db(&self) -> Surreal<Db> {
        self.db.restaurant.clone()
    }

    /// 触发优雅停机
    pub fn request_shutdown(&self) {
        self.shutdown.cancel();
    }
}
