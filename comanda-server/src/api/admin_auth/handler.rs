//! 员工认证处理器
//!
//! 登录失败统一返回 "Invalid username or password"，并在查库后固定延迟，
//! 避免用户名枚举和时序侧信道。

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::StaffUser;
use crate::db::repository::StaffUserRepository;
use crate::security_log;
use crate::utils::error::{ok, ok_with_message};
use crate::utils::time::now_millis;
use crate::utils::validation::validate_body;
use crate::utils::{AppError, AppResult};

use shared::{ApiResponse, LoginResponse, RegisterStaffRequest, StaffLoginRequest, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn staff_user_info(user: &StaffUser) -> UserInfo {
    UserInfo {
        id: user.id_string().unwrap_or_default(),
        username: user.username.clone(),
        display_name: user.display_name.clone(),
        kind: "staff".to_string(),
        role: Some(user.role),
        permissions: user.permissions.clone(),
    }
}

/// 员工登录
///
/// 校验账号密码并签发员工受众的 JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<StaffLoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    validate_body(&req)?;

    let repo = StaffUserRepository::new(state.admin_db());
    let user = repo.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let user = match user {
        Some(u) => {
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }
            if !u.verify_password(&req.password) {
                security_log!(
                    "WARN",
                    "staff_login_failed",
                    username = req.username.clone(),
                    reason = "invalid_credentials"
                );
                return Err(AppError::invalid_credentials());
            }
            u
        }
        None => {
            security_log!(
                "WARN",
                "staff_login_failed",
                username = req.username.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id_string().unwrap_or_default();
    let token = state
        .jwt_service()
        .generate_staff_token(
            &user_id,
            &user.username,
            &user.display_name,
            user.role.as_str(),
            &user.permissions,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        username = %user.username,
        role = user.role.as_str(),
        "Staff logged in"
    );

    Ok(ok_with_message(
        LoginResponse {
            token,
            user: staff_user_info(&user),
        },
        "Login successful",
    ))
}

/// 创建员工账号 (管理员)
///
/// 权限列表由角色推导写入，用户名重复返回 409
pub async fn register(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentUser>,
    Json(req): Json<RegisterStaffRequest>,
) -> AppResult<Json<ApiResponse<StaffUser>>> {
    validate_body(&req)?;

    let repo = StaffUserRepository::new(state.admin_db());
    let created = repo.create(req, now_millis()).await?;

    security_log!(
        "INFO",
        "staff_registered",
        username = created.username.clone(),
        role = created.role.as_str(),
        created_by = actor.username.clone()
    );

    Ok(ok_with_message(created, "Staff account created"))
}

/// 当前员工信息
///
/// 从库里取最新数据，账号被删后令牌立即失效于此接口
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    if !user.is_staff() {
        return Err(AppError::forbidden("Staff token required"));
    }

    let repo = StaffUserRepository::new(state.admin_db());
    let staff = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account no longer exists"))?;

    if !staff.is_active {
        return Err(AppError::forbidden("Account has been disabled"));
    }

    Ok(ok(staff_user_info(&staff)))
}
