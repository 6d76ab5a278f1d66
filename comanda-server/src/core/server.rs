//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::require_auth;
use crate::core::{Config, ServerState};
use crate::utils::{AppError, AppResult};

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core APIs
        .merge(crate::api::health::router())
        .merge(crate::api::admin_auth::router())
        .merge(crate::api::customers::router())
        // Business APIs
        .merge(crate::api::table_reservations::router())
        .merge(crate::api::orders::router())
        .merge(crate::api::qr_orders::router())
        .merge(crate::api::pre_orders::router())
        .merge(crate::api::menu::router())
        .merge(crate::api::inventory::router())
        .merge(crate::api::feedback::router())
}

/// CORS 层：配置了来源则只放行该来源，否则全放开
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    match origin.and_then(|o| o.parse::<http::HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

/// Assemble the full router with state and middleware attached.
///
/// Socket.IO 层挂在认证中间件之外，握手不要求令牌；
/// 推送权限由房间加入事件自行约束。
pub fn build_router(state: ServerState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    build_app()
        // JWT 认证中间件 - require_auth 内部会跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone())
        // Socket.IO (握手路径 /socket.io/ 不经过认证)
        .layer(state.socket_layer.clone())
        // Tower HTTP 中间件
        .layer(cors)
        .layer(CompressionLayer::new())
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        // Create application state if not provided
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| AppError::internal(format!("Failed to read local addr: {e}")))?;
        tracing::info!("🍽️ Comanda server listening on http://{}", local_addr);

        let shutdown = state.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Ctrl-C received, shutting down...");
                    }
                    _ = shutdown.cancelled() => {
                        tracing::info!("Shutdown requested, draining connections...");
                    }
                }
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        Ok(())
    }
}
