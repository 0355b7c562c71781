//! 路由配置模块

use std::time::Duration;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use booking_shared::config::ServerConfig;
use booking_shared::observability::middleware as obs_middleware;

use crate::{handlers, middleware::auth_middleware, state::AppState};

/// 预订路由（需要认证）
pub fn booking_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/booking",
            get(handlers::booking::get_booking).post(handlers::booking::create_booking),
        )
        .route("/booking/{booking_id}", put(handlers::booking::update_booking))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// 探针路由（公开）
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

/// 构建完整应用
///
/// 中间件自外向内：request_id -> http_tracing -> CORS -> 安全头 -> 超时
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(booking_routes(state.clone()))
        .merge(health_routes())
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(&server.cors_origins))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}

fn cors_layer(allowed_origins: &str) -> CorsLayer {
    if allowed_origins == "*" {
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", allowed_origins);
    let origins: Vec<_> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 为所有响应注入 HTTP 安全头
async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("0"));
    response
}
