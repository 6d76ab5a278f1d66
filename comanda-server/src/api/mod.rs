//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`admin_auth`] - 员工认证接口
//! - [`customers`] - 顾客账号接口
//! - [`table_reservations`] - 订座接口
//! - [`orders`] - 前台渠道订单接口 (ORD)
//! - [`qr_orders`] - 扫码渠道订单接口 (QR)
//! - [`pre_orders`] - 预订单接口 (PRE)
//! - [`menu`] - 菜单管理接口
//! - [`inventory`] - 库存管理接口
//! - [`feedback`] - 用餐评价接口
//!
//! 所有响应使用统一信封 `{success, message, data}`。
//! 公开路由 (顾客自助动线) 在认证中间件里按路径放行，
//! 后台路由按角色权限逐组加 [`crate::auth::require_permission`] 层。

pub mod admin_auth;
pub mod customers;
pub mod feedback;
pub mod health;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod pre_orders;
pub mod qr_orders;
pub mod table_reservations;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
