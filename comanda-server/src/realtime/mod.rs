//! 实时推送
//!
//! Socket.IO 层挂在 axum Router 外侧，认证中间件不拦截握手。

pub mod relay;

pub use relay::RelayService;
