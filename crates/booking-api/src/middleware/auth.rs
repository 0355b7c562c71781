//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token 并将 `AuthUser` 注入请求扩展

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// 认证中间件
///
/// 只挂在预订路由上，健康检查不经过此中间件
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return ApiError::Unauthorized("缺少认证 Token".to_string()).into_response();
    };

    let user = state
        .jwt_manager
        .verify_token(token)
        .and_then(|claims| claims.user_id());

    match user {
        Ok(user_id) => {
            request.extensions_mut().insert(AuthUser { user_id });
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
