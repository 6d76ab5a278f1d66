//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/health | GET | 存活 + 三个存储的探活结果 | 无 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "success": true,
//!   "data": {
//!     "status": "healthy",
//!     "version": "0.1.0",
//!     "stores": { "admin": true, "customer": true, "restaurant": true },
//!     "realtime": { "epoch": "…", "connections": 2 }
//!   }
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;
use crate::db::StoreHealth;
use crate::utils::{error::ok, time::now_millis};
use shared::ApiResponse;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// 健康检查响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// 状态 (healthy | degraded)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    /// 服务器时间 (Unix millis)
    server_time: i64,
    /// 各存储探活结果
    stores: StoreHealth,
    /// 实时推送状态
    realtime: RealtimeHealth,
}

/// 实时推送层的状态快照
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeHealth {
    /// 本次启动的 epoch，客户端用它检测重启
    epoch: String,
    /// 当前连接数
    connections: usize,
}

// 服务器启动时间 (懒加载静态变量)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// 存活检查，顺带报告三个存储和推送层的状态
pub async fn health(State(state): State<ServerState>) -> Json<ApiResponse<HealthResponse>> {
    let stores = state.db.health().await;

    ok(HealthResponse {
        status: if stores.all_ok() { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: get_uptime_seconds(),
        server_time: now_millis(),
        stores,
        realtime: RealtimeHealth {
            epoch: state.relay.epoch().to_string(),
            connections: state.relay.connection_count(),
        },
    })
}
