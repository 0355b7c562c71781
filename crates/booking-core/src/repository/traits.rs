//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Booking, BookingWithRoom, EnrollmentWithAddress, Ticket};

/// 带容量条件的写入结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityWrite {
    /// 写入成功
    Written(Booking),
    /// 房间已达上限，未写入
    RoomFull,
    /// 目标行不存在（房间或预订），未写入
    Missing,
}

/// 预订仓储接口
///
/// 每个方法都是一次独立的数据库往返，方法之间不共享事务
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepositoryTrait: Send + Sync {
    // 查询
    async fn find_booking_by_user(&self, user_id: i64) -> Result<Option<BookingWithRoom>>;
    async fn find_booking_by_room(&self, room_id: i64) -> Result<Option<BookingWithRoom>>;
    async fn find_booking_by_id(&self, booking_id: i64) -> Result<Option<Booking>>;
    async fn count_bookings_for_room(&self, room_id: i64) -> Result<i64>;

    // 写入（不做存在性与容量检查）
    async fn create_booking(&self, room_id: i64, user_id: i64) -> Result<Option<Booking>>;
    async fn update_booking_room(&self, room_id: i64, booking_id: i64)
    -> Result<Option<Booking>>;

    // 写入（同一事务内锁定房间、计数并写入）
    async fn create_booking_within_capacity(
        &self,
        room_id: i64,
        user_id: i64,
        capacity: i64,
    ) -> Result<CapacityWrite>;
    async fn update_booking_room_within_capacity(
        &self,
        room_id: i64,
        booking_id: i64,
        capacity: i64,
    ) -> Result<CapacityWrite>;
}

/// 报名查询接口（报名服务只读视图）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepositoryTrait: Send + Sync {
    async fn find_enrollment_with_address_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<EnrollmentWithAddress>>;
}

/// 门票查询接口（门票服务只读视图）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepositoryTrait: Send + Sync {
    async fn find_ticket_by_enrollment_id(&self, enrollment_id: i64) -> Result<Option<Ticket>>;
}
