//! 预订服务错误类型
//!
//! 业务错误只分两类：资源不存在（NotFound）与策略拒绝（Forbidden）。
//! 系统错误不单独分类，按 Forbidden 处理。

use thiserror::Error;

/// 错误分类
///
/// 调用方（HTTP 层）只依据分类决定状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
}

/// 预订服务错误类型
#[derive(Debug, Error)]
pub enum BookingError {
    // === NotFound ===
    #[error("用户没有预订: user_id={0}")]
    NoBookingForUser(i64),

    #[error("房间没有任何预订: room_id={0}")]
    NoBookingForRoom(i64),

    #[error("预订不存在: booking_id={0}")]
    BookingNotFound(i64),

    #[error("房间不存在: room_id={0}")]
    RoomNotFound(i64),

    // === Forbidden ===
    #[error("房间已满: room_id={room_id}, capacity={capacity}")]
    RoomFull { room_id: i64, capacity: i64 },

    #[error("用户不满足预订条件: user_id={0}")]
    NotEligible(i64),

    #[error("预订不属于当前用户: booking_id={booking_id}, user_id={user_id}")]
    NotOwner { booking_id: i64, user_id: i64 },

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 预订服务 Result 类型别名
pub type Result<T> = std::result::Result<T, BookingError>;

impl BookingError {
    /// 错误分类
    ///
    /// 只有明确的"不存在"类错误归为 NotFound，其余一律归为 Forbidden
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoBookingForUser(_)
            | Self::NoBookingForRoom(_)
            | Self::BookingNotFound(_)
            | Self::RoomNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Forbidden,
        }
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoBookingForUser(_) | Self::NoBookingForRoom(_) => "BOOKING_NOT_FOUND",
            Self::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            Self::RoomNotFound(_) => "ROOM_NOT_FOUND",
            Self::RoomFull { .. } => "ROOM_FULL",
            Self::NotEligible(_) => "NOT_ELIGIBLE",
            Self::NotOwner { .. } => "NOT_OWNER",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 指标标签
    pub(crate) fn outcome(&self) -> &'static str {
        if !self.is_business_error() {
            return "error";
        }
        match self.kind() {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Forbidden => "forbidden",
        }
    }
}
