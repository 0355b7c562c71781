//! 预订与房间实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 房间
///
/// 占用数不落库，由引用该房间的预订数实时统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub name: String,
    /// 房间床位数（展示用，不参与预订上限判断）
    pub capacity: i32,
    /// 所属酒店 ID
    pub hotel_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 预订
///
/// 创建后只允许通过换房修改 `room_id`，`user_id` 不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// 预订是否属于指定用户
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// 预订及其关联房间
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithRoom {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub room: Room,
}

impl BookingWithRoom {
    pub fn new(booking: Booking, room: Room) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            room_id: booking.room_id,
            room,
        }
    }
}
