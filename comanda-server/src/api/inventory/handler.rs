//! 库存处理器
//!
//! 状态永远由 (quantity, minStock) 推导，任何写路径都重算并广播
//! `inventory-updated`，后台面板据此实时刷新。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::InventoryItem;
use crate::db::repository::InventoryRepository;
use crate::utils::error::{ok, ok_with_message};
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_body, validate_optional_text,
};
use crate::utils::{AppError, AppResult};

use shared::events::INVENTORY_UPDATED;
use shared::{ApiResponse, CreateInventoryRequest, UpdateInventoryRequest};

/// 库存列表
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<InventoryItem>>>> {
    let repo = InventoryRepository::new(state.restaurant_db());
    let items = repo.find_all().await?;
    Ok(ok(items))
}

/// 新增原料，名称重复返回 409
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateInventoryRequest>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    validate_body(&req)?;

    let repo = InventoryRepository::new(state.restaurant_db());
    let item = repo
        .create(InventoryItem::from_request(req, now_millis()))
        .await?;

    state.relay.broadcast(INVENTORY_UPDATED, &item).await;

    Ok(ok_with_message(item, "Inventory item created"))
}

/// 修改原料 / 增减数量
///
/// 绝对字段先生效，`action`+`amount` 的相对调整随后生效，
/// 扣减到 0 为止不产生负数。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateInventoryRequest>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    validate_optional_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.unit, "unit", MAX_SHORT_TEXT_LEN)?;

    let repo = InventoryRepository::new(state.restaurant_db());
    let mut item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inventory item {} not found", id)))?;

    if let Some(name) = req.name {
        if name != item.name && repo.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Inventory item '{}' already exists",
                name
            )));
        }
        item.name = name;
    }
    if let Some(unit) = req.unit {
        item.unit = unit;
    }
    if let Some(min_stock) = req.min_stock {
        item.min_stock = min_stock.max(0);
    }
    if let Some(quantity) = req.quantity {
        item.quantity = quantity.max(0);
    }
    if let Some(action) = req.action {
        let amount = req.amount.unwrap_or(0);
        if amount < 0 {
            return Err(AppError::validation("Adjustment amount must not be negative"));
        }
        item.apply_adjustment(action, amount);
    }
    item.refresh_status();

    let saved = repo.save(&item, now_millis()).await?;

    state.relay.broadcast(INVENTORY_UPDATED, &saved).await;

    Ok(ok(saved))
}

/// 删除原料
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = InventoryRepository::new(state.restaurant_db());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inventory item {} not found", id)))?;
    repo.delete(&id).await?;

    // 删除也是一次写，面板收到事件后重新拉取列表
    state.relay.broadcast(INVENTORY_UPDATED, &item).await;

    Ok(Json(ApiResponse::message_only("Inventory item deleted")))
}
