//! Comanda Server - 餐厅点餐与订座平台服务端
//!
//! # 架构概述
//!
//! 本模块是平台服务端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 三个独立的嵌入式 SurrealDB 存储 (admin / customer / restaurant)
//! - **认证** (`auth`): JWT + Argon2 认证体系，员工与顾客双身份空间
//! - **订单** (`orders`): 三渠道统一订单生命周期 (QR 扫码 / 前台 / 预订单)
//! - **订座** (`reservations`): 日期+时段+桌号冲突检测
//! - **实时推送** (`realtime`): Socket.IO 房间广播 (fire-and-forget)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限
//! ├── db/            # 数据库层 (模型 + 仓储)
//! ├── orders/        # 订单生命周期
//! ├── reservations/  # 订座与冲突检测
//! ├── realtime/      # Socket.IO 推送
//! ├── notify/        # Webhook 通知 (best-effort)
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod realtime;
pub mod reservations;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderLifecycle;
pub use reservations::ReservationService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), None, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
