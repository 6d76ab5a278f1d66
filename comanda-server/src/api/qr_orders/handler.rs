//! 扫码渠道订单处理器
//!
//! 桌号必填的校验在 [`crate::orders::OrderLifecycle::create`] 里做。

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

const CHANNEL: OrderChannel = OrderChannel::DineInQr;

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// 扫码下单
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
