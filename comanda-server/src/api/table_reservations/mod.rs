//! 订座接口
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/table-reservations | POST | 创建订座 | 无 |
//! | /api/table-reservations/availability | GET | 查询某日某时段的桌位 | 无 |
//! | /api/table-reservations | GET | 订座列表 (后台) | reservations:read |
//! | /api/table-reservations/{id}/status | PUT | 推进状态 | reservations:manage |
//! | /api/table-reservations/{id}/cancel | PUT | 取消 | reservations:manage |

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/table-reservations", routes())
}

fn routes() -> Router<ServerState> {
    // 顾客自助动线，无需令牌
    let public_routes = Router::new()
        .route("/", post(handler::create))
        .route("/availability", get(handler::availability));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission("reservations:read")));

    let manage_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/cancel", put(handler::cancel))
        .layer(middleware::from_fn(require_permission(
            "reservations:manage",
        )));

    public_routes.merge(read_routes).merge(manage_routes)
}
