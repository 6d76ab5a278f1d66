//! 订座处理器

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::Reservation;
use crate::utils::error::{ok, ok_with_message};
use crate::utils::validation::validate_body;
use crate::utils::AppResult;

use shared::{
    ApiResponse, CreateReservationRequest, TableAvailability, UpdateReservationStatusRequest,
};

/// Query params for the availability lookup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub time_slot: String,
}

/// 创建订座
///
/// 与该日该时段的活跃订座做桌号冲突检测，冲突时 409 并指名重叠桌号
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    validate_body(&req)?;
    let reservation = state.reservations.create(req).await?;
    Ok(ok_with_message(reservation, "Reservation confirmed"))
}

/// 查询某日某时段的可用/已订桌位
pub async fn availability(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<TableAvailability>>> {
    let availability = state
        .reservations
        .availability(&query.date, &query.time_slot)
        .await?;
    Ok(ok(availability))
}

/// 订座列表 (后台)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let reservations = state.reservations.list().await?;
    Ok(ok(reservations))
}

/// 推进订座状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateReservationStatusRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservations.update_status(&id, req.status).await?;
    Ok(ok(reservation))
}

/// 取消订座
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservations.cancel(&id).await?;
    Ok(ok_with_message(reservation, "Reservation cancelled"))
}
