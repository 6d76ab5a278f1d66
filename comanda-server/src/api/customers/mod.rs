//! 顾客账号接口
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/customers/register | POST | 顾客注册，注册即登录 | 无 |
//! | /api/customers/login | POST | 顾客登录，换取 JWT | 无 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
}
