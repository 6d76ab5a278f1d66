//! 扫码渠道订单接口 (QR)
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/qr-orders/public | POST | 扫码下单 (桌号必填) | 无 |
//! | /api/qr-orders/track/{code} | GET | 按单号追踪 | 无 |
//! | /api/qr-orders | GET | 订单列表 (可选 ?status=) | orders:read |
//! | /api/qr-orders/{id}/status | PUT | 更新状态/烹饪进度 | orders:manage |

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/qr-orders", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/public", post(handler::create_public))
        .route("/track/{code}", get(handler::track));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission("orders:read")));

    let manage_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_permission("orders:manage")));

    public_routes.merge(read_routes).merge(manage_routes)
}
