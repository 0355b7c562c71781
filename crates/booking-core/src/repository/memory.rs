//! 内存仓储
//!
//! 基于 DashMap 的仓储实现，同时实现预订、报名、门票三个仓储接口，
//! 用于本地开发和 HTTP 层测试。写入语义与 Postgres 实现保持一致：
//! 引用不存在的房间视为外键失败，返回 None。

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;

use super::traits::{
    BookingRepositoryTrait, CapacityWrite, EnrollmentRepositoryTrait, TicketRepositoryTrait,
};
use crate::error::Result;
use crate::models::{Booking, BookingWithRoom, EnrollmentWithAddress, Room, Ticket};

#[derive(Debug, Default)]
struct Inner {
    rooms: DashMap<i64, Room>,
    bookings: DashMap<i64, Booking>,
    /// key: user_id
    enrollments: DashMap<i64, EnrollmentWithAddress>,
    /// key: enrollment_id
    tickets: DashMap<i64, Ticket>,
    last_booking_id: AtomicI64,
    /// 带容量条件的写入串行执行，等价于锁定房间行
    write_lock: Mutex<()>,
}

/// 内存存储
///
/// Clone 后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 数据准备 ====================

    pub fn insert_room(&self, room: Room) {
        self.inner.rooms.insert(room.id, room);
    }

    pub fn insert_enrollment(&self, enrollment: EnrollmentWithAddress) {
        self.inner.enrollments.insert(enrollment.user_id, enrollment);
    }

    pub fn insert_ticket(&self, ticket: Ticket) {
        self.inner.tickets.insert(ticket.enrollment_id, ticket);
    }

    /// 直接写入一条预订，不做任何检查
    pub fn insert_booking(&self, user_id: i64, room_id: i64) -> Booking {
        let now = Utc::now();
        let booking = Booking {
            id: self.next_booking_id(),
            user_id,
            room_id,
            created_at: now,
            updated_at: now,
        };
        self.inner.bookings.insert(booking.id, booking.clone());
        booking
    }

    /// 预订总数
    pub fn booking_count(&self) -> usize {
        self.inner.bookings.len()
    }

    // ==================== 内部操作 ====================

    fn next_booking_id(&self) -> i64 {
        self.inner.last_booking_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 满足条件的 ID 最小的预订
    fn first_booking_where<F>(&self, predicate: F) -> Option<Booking>
    where
        F: Fn(&Booking) -> bool,
    {
        self.inner
            .bookings
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .min_by_key(|booking| booking.id)
    }

    fn with_room(&self, booking: Booking) -> Option<BookingWithRoom> {
        let room = self.inner.rooms.get(&booking.room_id)?.clone();
        Some(BookingWithRoom::new(booking, room))
    }

    fn count_for_room(&self, room_id: i64) -> i64 {
        self.inner
            .bookings
            .iter()
            .filter(|entry| entry.value().room_id == room_id)
            .count() as i64
    }

    fn create(&self, room_id: i64, user_id: i64) -> Option<Booking> {
        if !self.inner.rooms.contains_key(&room_id) {
            return None;
        }
        Some(self.insert_booking(user_id, room_id))
    }

    fn update(&self, room_id: i64, booking_id: i64) -> Option<Booking> {
        if !self.inner.rooms.contains_key(&room_id) {
            return None;
        }
        let mut entry = self.inner.bookings.get_mut(&booking_id)?;
        entry.room_id = room_id;
        entry.updated_at = Utc::now();
        Some(entry.clone())
    }

    fn write_within_capacity<F>(&self, room_id: i64, capacity: i64, write: F) -> CapacityWrite
    where
        F: FnOnce() -> Option<Booking>,
    {
        let _guard = self.inner.write_lock.lock();

        if !self.inner.rooms.contains_key(&room_id) {
            return CapacityWrite::Missing;
        }
        if self.count_for_room(room_id) >= capacity {
            return CapacityWrite::RoomFull;
        }
        match write() {
            Some(booking) => CapacityWrite::Written(booking),
            None => CapacityWrite::Missing,
        }
    }
}

#[async_trait]
impl BookingRepositoryTrait for MemoryStore {
    async fn find_booking_by_user(&self, user_id: i64) -> Result<Option<BookingWithRoom>> {
        Ok(self
            .first_booking_where(|b| b.user_id == user_id)
            .and_then(|b| self.with_room(b)))
    }

    async fn find_booking_by_room(&self, room_id: i64) -> Result<Option<BookingWithRoom>> {
        Ok(self
            .first_booking_where(|b| b.room_id == room_id)
            .and_then(|b| self.with_room(b)))
    }

    async fn find_booking_by_id(&self, booking_id: i64) -> Result<Option<Booking>> {
        Ok(self.inner.bookings.get(&booking_id).map(|b| b.clone()))
    }

    async fn count_bookings_for_room(&self, room_id: i64) -> Result<i64> {
        Ok(self.count_for_room(room_id))
    }

    async fn create_booking(&self, room_id: i64, user_id: i64) -> Result<Option<Booking>> {
        Ok(self.create(room_id, user_id))
    }

    async fn update_booking_room(
        &self,
        room_id: i64,
        booking_id: i64,
    ) -> Result<Option<Booking>> {
        Ok(self.update(room_id, booking_id))
    }

    async fn create_booking_within_capacity(
        &self,
        room_id: i64,
        user_id: i64,
        capacity: i64,
    ) -> Result<CapacityWrite> {
        Ok(self.write_within_capacity(room_id, capacity, || self.create(room_id, user_id)))
    }

    async fn update_booking_room_within_capacity(
        &self,
        room_id: i64,
        booking_id: i64,
        capacity: i64,
    ) -> Result<CapacityWrite> {
        Ok(self.write_within_capacity(room_id, capacity, || self.update(room_id, booking_id)))
    }
}

#[async_trait]
impl EnrollmentRepositoryTrait for MemoryStore {
    async fn find_enrollment_with_address_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<EnrollmentWithAddress>> {
        Ok(self.inner.enrollments.get(&user_id).map(|e| e.clone()))
    }
}

#[async_trait]
impl TicketRepositoryTrait for MemoryStore {
    async fn find_ticket_by_enrollment_id(&self, enrollment_id: i64) -> Result<Option<Ticket>> {
        Ok(self.inner.tickets.get(&enrollment_id).map(|t| t.clone()))
    }
}
