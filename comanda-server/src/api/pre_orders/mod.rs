//! 预订单接口 (PRE)
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/pre-orders | POST | 创建预订单 (scheduledFor 必填) | 无 |
//! | /api/pre-orders | GET | 列表 (可选 ?status=) | orders:read |
//! | /api/pre-orders/{id}/status | PUT | 仅接受 completed | orders:manage |
//! | /api/pre-orders/{id}/cancel | PUT | 取消 (未到终态时) | orders:manage |

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pre-orders", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/", post(handler::create));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission("orders:read")));

    let manage_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/cancel", put(handler::cancel))
        .layer(middleware::from_fn(require_permission("orders:manage")));

    public_routes.merge(read_routes).merge(manage_routes)
}
