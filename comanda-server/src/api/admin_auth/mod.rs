//! 员工认证接口
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/admin-auth/login | POST | 员工登录，换取 JWT | 无 |
//! | /api/admin-auth/register | POST | 创建员工账号 | 管理员 |
//! | /api/admin-auth/me | GET | 当前员工信息 | 员工令牌 |

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin-auth", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/login", post(handler::login));

    let staff_routes = Router::new().route("/me", get(handler::me));

    // 账号创建仅限管理员
    let admin_routes = Router::new()
        .route("/register", post(handler::register))
        .layer(middleware::from_fn(require_admin));

    public_routes.merge(staff_routes).merge(admin_routes)
}
