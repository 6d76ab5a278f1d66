//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 顾客自助动线上的公开接口，不要求令牌。
/// 扫码点餐、订座、追踪、评价都可能发生在登录之前。
fn is_public_route(method: &http::Method, path: &str) -> bool {
    match *method {
        http::Method::GET => {
            path == "/api/health"
                || path == "/api/menu"
                || path == "/api/table-reservations/availability"
                || path.starts_with("/api/orders/track/")
                || path.starts_with("/api/qr-orders/track/")
        }
        http::Method::POST => matches!(
            path,
            "/api/table-reservations"
                | "/api/orders/public"
                | "/api/qr-orders/public"
                | "/api/pre-orders"
                | "/api/feedback"
                | "/api/admin-auth/login"
                | "/api/customers/register"
                | "/api/customers/login"
        ),
        _ => false,
    }
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展 (`req.extensions_mut().insert(user)`)。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - [`is_public_route`] 列出的公开接口
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 权限检查中间件 - 要求特定权限
///
/// # 参数
///
/// - `permission`: 所需权限，如 `"orders:manage"`, `"inventory:read"`
///
/// # 支持的通配符
///
/// - `"orders:*"` 匹配所有 orders 相关操作
/// - `"all"` 匹配所有权限
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/inventory", get(handler::list))
///     .layer(middleware::from_fn(require_permission("inventory:read")));
/// ```
///
/// # 错误
///
/// 顾客令牌或权限不足返回 403 Forbidden
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id.clone(),
                    username = user.username.clone(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

/// 管理员中间件 - 要求管理员角色
///
/// 检查 `CurrentUser::is_admin()`
///
/// # 错误
///
/// 非管理员返回 403 Forbidden
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            username = user.username.clone(),
            user_role = user.role.clone()
        );
        return Err(AppError::forbidden("Administrator role required"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes_cover_customer_journey() {
        let get = http::Method::GET;
        let post = http::Method::POST;
        let put = http::Method::PUT;

        assert!(is_public_route(&get, "/api/health"));
        assert!(is_public_route(&get, "/api/menu"));
        assert!(is_public_route(&get, "/api/orders/track/ORD001"));
        assert!(is_public_route(&get, "/api/qr-orders/track/QR003"));
        assert!(is_public_route(&post, "/api/table-reservations"));
        assert!(is_public_route(&post, "/api/qr-orders/public"));
        assert!(is_public_route(&post, "/api/feedback"));

        // 后台面只对持令牌用户开放
        assert!(!is_public_route(&get, "/api/orders"));
        assert!(!is_public_route(&get, "/api/table-reservations"));
        assert!(!is_public_route(&put, "/api/orders/abc/status"));
        assert!(!is_public_route(&post, "/api/inventory"));
        assert!(!is_public_route(&post, "/api/admin-auth/register"));
    }
}
