//! 酒店预订服务
//!
//! 执行三条预订规则：
//! - 存在性：查找不到预订时返回 NotFound
//! - 资格：报名、地址、门票齐全，门票已支付、线下且含住宿
//! - 容量：房间预订数达到上限时拒绝
//!
//! ## 创建流程
//!
//! 1. 容量检查 -> 2. 资格检查 -> 3. 写入
//!
//! ## 换房流程
//!
//! 1. 目标房间存在性探测 -> 2. 容量检查 -> 3. 归属检查（可选） -> 4. 写入

use std::sync::Arc;

use tracing::{info, instrument, warn};

use booking_shared::config::{BookingConfig, DEFAULT_ROOM_CAPACITY};
use booking_shared::observability::metrics::record_booking;

use crate::error::{BookingError, Result};
use crate::models::{Booking, BookingWithRoom, EnrollmentWithAddress, Ticket};
use crate::repository::{
    BookingRepositoryTrait, CapacityWrite, EnrollmentRepositoryTrait, TicketRepositoryTrait,
};

/// 预订查询方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingLookup {
    ByUser(i64),
    ByRoom(i64),
}

/// 容量检查方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapacityMode {
    /// 先计数再写入，两步之间不加锁
    #[default]
    TwoStep,
    /// 写入时在同一事务内锁定房间并重新计数
    Atomic,
}

/// 预订策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPolicy {
    pub room_capacity: i64,
    pub capacity_mode: CapacityMode,
    pub enforce_ownership: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            room_capacity: DEFAULT_ROOM_CAPACITY,
            capacity_mode: CapacityMode::TwoStep,
            enforce_ownership: false,
        }
    }
}

impl From<&BookingConfig> for BookingPolicy {
    fn from(config: &BookingConfig) -> Self {
        Self {
            room_capacity: config.room_capacity,
            capacity_mode: if config.strict_capacity {
                CapacityMode::Atomic
            } else {
                CapacityMode::TwoStep
            },
            enforce_ownership: config.enforce_ownership,
        }
    }
}

/// 用户是否具备预订酒店的资格
///
/// 所有条件合并为一个布尔值，不区分具体哪一项不满足
pub fn is_eligible(enrollment: Option<&EnrollmentWithAddress>, ticket: Option<&Ticket>) -> bool {
    let has_enrollment = enrollment.is_some_and(|e| e.has_address());
    let has_valid_ticket = ticket.is_some_and(|t| t.grants_hotel_access());
    has_enrollment && has_valid_ticket
}

/// 酒店预订服务
pub struct BookingService {
    booking_repo: Arc<dyn BookingRepositoryTrait>,
    enrollment_repo: Arc<dyn EnrollmentRepositoryTrait>,
    ticket_repo: Arc<dyn TicketRepositoryTrait>,
    policy: BookingPolicy,
}

impl BookingService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepositoryTrait>,
        enrollment_repo: Arc<dyn EnrollmentRepositoryTrait>,
        ticket_repo: Arc<dyn TicketRepositoryTrait>,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            booking_repo,
            enrollment_repo,
            ticket_repo,
            policy,
        }
    }

    /// 查询预订（含房间）
    #[instrument(skip(self))]
    pub async fn get_booking(&self, lookup: BookingLookup) -> Result<BookingWithRoom> {
        let result = self.find_existing(lookup).await;
        record_booking("get", outcome(&result));
        result
    }

    /// 创建预订
    ///
    /// 先检查容量再检查资格，房间已满时即使用户不满足资格也返回容量错误
    #[instrument(skip(self), fields(room_id = %room_id, user_id = %user_id))]
    pub async fn create_booking(&self, room_id: i64, user_id: i64) -> Result<Booking> {
        let result = self.do_create_booking(room_id, user_id).await;
        record_booking("create", outcome(&result));
        result
    }

    /// 换房
    ///
    /// 目标房间必须已有至少一条预订，否则返回 NotFound
    #[instrument(
        skip(self),
        fields(room_id = %room_id, user_id = %user_id, booking_id = %booking_id)
    )]
    pub async fn update_booking(
        &self,
        room_id: i64,
        user_id: i64,
        booking_id: i64,
    ) -> Result<Booking> {
        let result = self.do_update_booking(room_id, user_id, booking_id).await;
        record_booking("update", outcome(&result));
        result
    }

    // ==================== 流程 ====================

    async fn do_create_booking(&self, room_id: i64, user_id: i64) -> Result<Booking> {
        // 1. 容量
        self.ensure_room_has_capacity(room_id).await?;

        // 2. 资格
        self.ensure_eligible(user_id).await?;

        // 3. 写入
        let booking = match self.policy.capacity_mode {
            CapacityMode::TwoStep => self
                .booking_repo
                .create_booking(room_id, user_id)
                .await?
                .ok_or(BookingError::RoomNotFound(room_id))?,
            CapacityMode::Atomic => {
                let write = self
                    .booking_repo
                    .create_booking_within_capacity(room_id, user_id, self.policy.room_capacity)
                    .await?;
                self.resolve_capacity_write(write, room_id, BookingError::RoomNotFound(room_id))?
            }
        };

        info!(booking_id = booking.id, "预订创建成功");
        Ok(booking)
    }

    async fn do_update_booking(
        &self,
        room_id: i64,
        user_id: i64,
        booking_id: i64,
    ) -> Result<Booking> {
        // 1. 目标房间存在性探测
        self.find_existing(BookingLookup::ByRoom(room_id)).await?;

        // 2. 容量
        self.ensure_room_has_capacity(room_id).await?;

        // 3. 归属
        if self.policy.enforce_ownership {
            self.ensure_owner(booking_id, user_id).await?;
        }

        // 4. 写入
        let booking = match self.policy.capacity_mode {
            CapacityMode::TwoStep => self
                .booking_repo
                .update_booking_room(room_id, booking_id)
                .await?
                .ok_or(BookingError::BookingNotFound(booking_id))?,
            CapacityMode::Atomic => {
                let write = self
                    .booking_repo
                    .update_booking_room_within_capacity(
                        room_id,
                        booking_id,
                        self.policy.room_capacity,
                    )
                    .await?;
                self.resolve_capacity_write(
                    write,
                    room_id,
                    BookingError::BookingNotFound(booking_id),
                )?
            }
        };

        info!("换房成功");
        Ok(booking)
    }

    // ==================== 规则 ====================

    async fn find_existing(&self, lookup: BookingLookup) -> Result<BookingWithRoom> {
        let (found, missing) = match lookup {
            BookingLookup::ByUser(user_id) => (
                self.booking_repo.find_booking_by_user(user_id).await?,
                BookingError::NoBookingForUser(user_id),
            ),
            BookingLookup::ByRoom(room_id) => (
                self.booking_repo.find_booking_by_room(room_id).await?,
                BookingError::NoBookingForRoom(room_id),
            ),
        };

        found.ok_or_else(|| {
            warn!(?lookup, "未找到预订");
            missing
        })
    }

    async fn ensure_room_has_capacity(&self, room_id: i64) -> Result<()> {
        let count = self.booking_repo.count_bookings_for_room(room_id).await?;
        if count >= self.policy.room_capacity {
            warn!(count, capacity = self.policy.room_capacity, "房间已满");
            return Err(BookingError::RoomFull {
                room_id,
                capacity: self.policy.room_capacity,
            });
        }
        Ok(())
    }

    async fn ensure_eligible(&self, user_id: i64) -> Result<()> {
        let enrollment = self
            .enrollment_repo
            .find_enrollment_with_address_by_user_id(user_id)
            .await?;

        let ticket = match &enrollment {
            Some(e) => self.ticket_repo.find_ticket_by_enrollment_id(e.id).await?,
            None => None,
        };

        if !is_eligible(enrollment.as_ref(), ticket.as_ref()) {
            warn!("用户不满足预订条件");
            return Err(BookingError::NotEligible(user_id));
        }
        Ok(())
    }

    async fn ensure_owner(&self, booking_id: i64, user_id: i64) -> Result<()> {
        let booking = self
            .booking_repo
            .find_booking_by_id(booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        if !booking.is_owned_by(user_id) {
            warn!(owner = booking.user_id, "预订不属于当前用户");
            return Err(BookingError::NotOwner {
                booking_id,
                user_id,
            });
        }
        Ok(())
    }

    fn resolve_capacity_write(
        &self,
        write: CapacityWrite,
        room_id: i64,
        missing: BookingError,
    ) -> Result<Booking> {
        match write {
            CapacityWrite::Written(booking) => Ok(booking),
            CapacityWrite::RoomFull => {
                warn!("写入时房间已满");
                Err(BookingError::RoomFull {
                    room_id,
                    capacity: self.policy.room_capacity,
                })
            }
            CapacityWrite::Missing => Err(missing),
        }
    }
}

fn outcome<T>(result: &Result<T>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(e) => e.outcome(),
    }
}
