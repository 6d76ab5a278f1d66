//! 菜单处理器
//!
//! 菜品是纯展示数据，订单按值拷贝名称和价格，不引用菜单。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::MenuItem;
use crate::db::repository::MenuItemRepository;
use crate::utils::AppResult;
use crate::utils::error::{ok, ok_with_message};
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_body, validate_optional_text,
};

use shared::{ApiResponse, CreateMenuItemRequest, MenuCategory, UpdateMenuItemRequest};

/// Query params for menu browsing
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub category: Option<MenuCategory>,
}

/// 菜单列表 (公开，可按分类过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    let repo = MenuItemRepository::new(state.restaurant_db());
    let items = match query.category {
        Some(category) => repo.find_by_category(category).await?,
        None => repo.find_all().await?,
    };
    Ok(ok(items))
}

/// 新增菜品，名称重复返回 409
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateMenuItemRequest>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    validate_body(&req)?;
    let repo = MenuItemRepository::new(state.restaurant_db());
    let item = repo.create(MenuItem::from_request(req, now_millis())).await?;
    Ok(ok_with_message(item, "Menu item created"))
}

/// 修改菜品 (部分字段)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateMenuItemRequest>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    validate_optional_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.description, "description", MAX_NOTE_LEN)?;

    let repo = MenuItemRepository::new(state.restaurant_db());
    let item = repo.update(&id, req, now_millis()).await?;
    Ok(ok(item))
}

/// 删除菜品
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = MenuItemRepository::new(state.restaurant_db());
    repo.delete(&id).await?;
    Ok(Json(ApiResponse::message_only("Menu item deleted")))
}
