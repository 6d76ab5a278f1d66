//! 预订单处理器
//!
//! 预订单创建即 confirmed；状态接口只认 completed，取消走独立路由。
//! 这些规则都在 [`crate::orders::OrderLifecycle`] 里集中实现。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::utils::AppResult;
use crate::utils::error::{ok, ok_with_message};
use crate::utils::validation::validate_body;

use shared::{ApiResponse, CreateOrderRequest, OrderChannel, OrderStatus, UpdateOrderStatusRequest};

const CHANNEL: OrderChannel = OrderChannel::Scheduled;

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// 创建预订单
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    validate_body(&req)?;
    let order = state.orders.create(CHANNEL, req).await?;
    Ok(ok_with_message(order, "Pre-order scheduled"))
}

/// 预订单列表 (后台，可按状态过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state.orders.list(CHANNEL, query.status).await?;
    Ok(ok(orders))
}

/// 标记完成 (预订单的唯一合法状态变更)
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.update_status(&id, req, &actor).await?;
    Ok(ok(order))
}

/// 取消预订单
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.cancel(&id).await?;
    Ok(ok_with_message(order, "Pre-order cancelled"))
}
