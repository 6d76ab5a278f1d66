//! 菜单管理接口
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/menu | GET | 菜单 (可选 ?category=) | 无 |
//! | /api/menu | POST | 新增菜品 | menu:manage |
//! | /api/menu/{id} | PUT | 修改菜品 | menu:manage |
//! | /api/menu/{id} | DELETE | 下架并删除 | menu:manage |

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/", get(handler::list));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::remove))
        .layer(middleware::from_fn(require_permission("menu:manage")));

    public_routes.merge(manage_routes)
}
