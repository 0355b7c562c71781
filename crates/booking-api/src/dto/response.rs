//! 响应 DTO 定义

use serde::Serialize;

use booking_core::{BookingWithRoom, Room};

/// GET /booking 响应：`{ id, Room }`
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i64,
    #[serde(rename = "Room")]
    pub room: Room,
}

impl From<BookingWithRoom> for BookingResponse {
    fn from(booking: BookingWithRoom) -> Self {
        Self {
            id: booking.id,
            room: booking.room,
        }
    }
}

/// POST /booking 响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookingResponse {
    pub room_id: i64,
    pub booking_id: i64,
}

/// PUT /booking/{bookingId} 响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdResponse {
    pub booking_id: i64,
}
