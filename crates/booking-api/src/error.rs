//! HTTP 层错误类型定义
//!
//! 预订业务错误按分类映射状态码：NotFound -> 404，其余一律 403。
//! 认证错误由本层自行产生；请求体、路径参数解析失败同样按 403 处理。

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use booking_core::{BookingError, ErrorKind};

/// HTTP 层错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("未授权: {0}")]
    Unauthorized(String),

    #[error("请求无法解析: {0}")]
    Rejected(String),

    #[error(transparent)]
    Booking(#[from] BookingError),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Rejected(_) => StatusCode::FORBIDDEN,
            Self::Booking(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            },
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Rejected(_) => "FORBIDDEN",
            Self::Booking(e) if e.is_business_error() => e.error_code(),
            Self::Booking(_) => "FORBIDDEN",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 未分类错误按 403 返回，详细信息只进日志
        let message = match &self {
            Self::Booking(e) if !e.is_business_error() => {
                tracing::error!(error = %e, "未分类错误，按禁止访问处理");
                "请求被拒绝".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(status = %rejection.status(), "请求体解析失败: {}", rejection.body_text());
        Self::Rejected(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(status = %rejection.status(), "路径参数解析失败: {}", rejection.body_text());
        Self::Rejected(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
