//! 库存管理接口
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/inventory | GET | 库存列表 | inventory:read |
//! | /api/inventory | POST | 新增原料 | inventory:manage |
//! | /api/inventory/{id} | PUT | 修改 / 增减数量 | inventory:manage |
//! | /api/inventory/{id} | DELETE | 删除原料 | inventory:manage |

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission("inventory:read")));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::remove))
        .layer(middleware::from_fn(require_permission("inventory:manage")));

    read_routes.merge(manage_routes)
}
