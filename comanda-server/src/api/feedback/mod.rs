//! 用餐评价接口
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/feedback | POST | 提交评价 (每单一次) | 无 |
//! | /api/feedback | GET | 评价列表 (后台) | feedback:read |

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/feedback", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/", post(handler::submit));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission("feedback:read")));

    public_routes.merge(read_routes)
}
