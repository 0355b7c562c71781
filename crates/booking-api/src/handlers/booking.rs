//! 预订 API 处理器
//!
//! 所有路由都需要认证，当前用户由认证中间件注入。
//! 请求体和路径参数的解析失败经 `WithRejection` 转为 `ApiError`。

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use tracing::info;

use booking_core::BookingLookup;

use crate::{
    auth::AuthUser,
    dto::{BookingBody, BookingIdResponse, BookingResponse, CreatedBookingResponse},
    error::ApiError,
    state::AppState,
};

/// 查询当前用户的预订
///
/// GET /booking
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .booking_service
        .get_booking(BookingLookup::ByUser(user.user_id))
        .await?;

    Ok(Json(booking.into()))
}

/// 为当前用户预订房间
///
/// POST /booking
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(req), _): WithRejection<Json<BookingBody>, ApiError>,
) -> Result<Json<CreatedBookingResponse>, ApiError> {
    let booking = state
        .booking_service
        .create_booking(req.room_id, user.user_id)
        .await?;

    info!(
        user_id = user.user_id,
        room_id = booking.room_id,
        booking_id = booking.id,
        "预订成功"
    );

    Ok(Json(CreatedBookingResponse {
        room_id: booking.room_id,
        booking_id: booking.id,
    }))
}

/// 将预订换到另一个房间
///
/// PUT /booking/{bookingId}
pub async fn update_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(booking_id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(req), _): WithRejection<Json<BookingBody>, ApiError>,
) -> Result<Json<BookingIdResponse>, ApiError> {
    let booking = state
        .booking_service
        .update_booking(req.room_id, user.user_id, booking_id)
        .await?;

    Ok(Json(BookingIdResponse {
        booking_id: booking.id,
    }))
}
