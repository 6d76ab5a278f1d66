//! 前台渠道订单处理器
//!
//! 渠道由路由决定，处理器只是 [`crate::orders::OrderLifecycle`] 的薄封装。

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

const CHANNEL: OrderChannel = OrderChannel::Staff;

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// 公开下单 (前台渠道)
pub async fn create_public(
    State(state): State<ServerState>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    validate_body(&req)?;
    let order = state.orders.create(CHANNEL, req).await?;
    Ok(ok_with_message(order, "Order placed"))
}

/// 按单号追踪 (公开)
pub async fn track(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.track(&code).await?;
    Ok(ok(order))
}

/// 订单列表 (后台，可按状态过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state.orders.list(CHANNEL, query.status).await?;
    Ok(ok(orders))
}

/// 更新状态/烹饪进度
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.update_status(&id, req, &actor).await?;
    Ok(ok(order))
}

/// 硬删除订单
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.orders.remove(&id).await?;
    Ok(Json(ApiResponse::message_only("Order deleted")))
}
