//! 顾客账号处理器
//!
//! 顾客令牌的受众与员工不同，后台权限检查天然拒绝顾客令牌。
//! 注册成功直接返回令牌，客户端不必再走一次登录。

use std::time::Duration;

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::Customer;
use crate::db::repository::CustomerRepository;
use crate::security_log;
use crate::utils::error::ok_with_message;
use crate::utils::time::now_millis;
use crate::utils::validation::validate_body;
use crate::utils::{AppError, AppResult};

use shared::{ApiResponse, CustomerLoginRequest, LoginResponse, RegisterCustomerRequest, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn customer_user_info(customer: &Customer) -> UserInfo {
    UserInfo {
        id: customer.id_string().unwrap_or_default(),
        username: customer.email.clone(),
        display_name: customer.name.clone(),
        kind: "customer".to_string(),
        role: None,
        permissions: Vec::new(),
    }
}

fn issue_token(state: &ServerState, customer: &Customer) -> AppResult<String> {
    state
        .jwt_service()
        .generate_customer_token(
            &customer.id_string().unwrap_or_default(),
            &customer.email,
            &customer.name,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}

/// 顾客注册
///
/// 邮箱重复返回 409，成功时签发顾客受众的 JWT
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterCustomerRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    validate_body(&req)?;

    let repo = CustomerRepository::new(state.customer_db());
    let customer = repo.create(req, now_millis()).await?;

    let token = issue_token(&state, &customer)?;

    tracing::info!(email = %customer.email, "Customer registered");

    Ok(ok_with_message(
        LoginResponse {
            token,
            user: customer_user_info(&customer),
        },
        "Account created",
    ))
}

/// 顾客登录
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<CustomerLoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    validate_body(&req)?;

    let repo = CustomerRepository::new(state.customer_db());
    let customer = repo.find_by_email(&req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let customer = match customer {
        Some(c) if c.verify_password(&req.password) => c,
        _ => {
            security_log!(
                "WARN",
                "customer_login_failed",
                email = req.email.clone()
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let token = issue_token(&state, &customer)?;

    tracing::info!(email = %customer.email, "Customer logged in");

    Ok(ok_with_message(
        LoginResponse {
            token,
            user: customer_user_info(&customer),
        },
        "Login successful",
    ))
}
