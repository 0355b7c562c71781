//! 预订仓储
//!
//! 提供预订的查询、创建、换房和房间占用统计

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use super::traits::{BookingRepositoryTrait, CapacityWrite};
use crate::error::Result;
use crate::models::{Booking, BookingWithRoom, Room};

/// 预订 + 房间联表查询结果
#[derive(sqlx::FromRow)]
struct BookingRoomRow {
    id: i64,
    user_id: i64,
    room_id: i64,
    room_name: String,
    room_capacity: i32,
    room_hotel_id: i64,
    room_created_at: DateTime<Utc>,
    room_updated_at: DateTime<Utc>,
}

impl From<BookingRoomRow> for BookingWithRoom {
    fn from(row: BookingRoomRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            room: Room {
                id: row.room_id,
                name: row.room_name,
                capacity: row.room_capacity,
                hotel_id: row.room_hotel_id,
                created_at: row.room_created_at,
                updated_at: row.room_updated_at,
            },
        }
    }
}

const BOOKING_WITH_ROOM_SELECT: &str = r#"
    SELECT b.id, b.user_id, b.room_id,
           r.name AS room_name, r.capacity AS room_capacity, r.hotel_id AS room_hotel_id,
           r.created_at AS room_created_at, r.updated_at AS room_updated_at
    FROM bookings b
    JOIN rooms r ON r.id = b.room_id
"#;

/// 外键约束失败视为目标不存在
fn foreign_key_as_none<T>(result: std::result::Result<T, sqlx::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// 预订仓储
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 按用户查找第一条预订（含房间）
    pub async fn find_booking_by_user(&self, user_id: i64) -> Result<Option<BookingWithRoom>> {
        let row = sqlx::query_as::<_, BookingRoomRow>(&format!(
            "{BOOKING_WITH_ROOM_SELECT} WHERE b.user_id = $1 ORDER BY b.id ASC LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// 按房间查找第一条预订（含房间）
    pub async fn find_booking_by_room(&self, room_id: i64) -> Result<Option<BookingWithRoom>> {
        let row = sqlx::query_as::<_, BookingRoomRow>(&format!(
            "{BOOKING_WITH_ROOM_SELECT} WHERE b.room_id = $1 ORDER BY b.id ASC LIMIT 1"
        ))
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// 根据 ID 获取预订
    pub async fn find_booking_by_id(&self, booking_id: i64) -> Result<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, room_id, created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// 统计房间当前预订数
    pub async fn count_bookings_for_room(&self, room_id: i64) -> Result<i64> {
        Self::count_bookings_for_room_in_tx(&mut *self.pool.acquire().await?, room_id).await
    }

    // ==================== 写入操作 ====================

    /// 创建预订
    ///
    /// 不检查房间是否存在或已满；房间不存在时外键约束失败，返回 None
    pub async fn create_booking(&self, room_id: i64, user_id: i64) -> Result<Option<Booking>> {
        Self::create_booking_in_tx(&mut *self.pool.acquire().await?, room_id, user_id).await
    }

    /// 修改预订的房间
    ///
    /// 预订不存在或目标房间不存在时返回 None
    pub async fn update_booking_room(
        &self,
        room_id: i64,
        booking_id: i64,
    ) -> Result<Option<Booking>> {
        Self::update_booking_room_in_tx(&mut *self.pool.acquire().await?, room_id, booking_id)
            .await
    }

    /// 在单个事务中检查容量并创建预订
    ///
    /// 锁定房间行后计数，两个并发请求不会同时看到空位
    pub async fn create_booking_within_capacity(
        &self,
        room_id: i64,
        user_id: i64,
        capacity: i64,
    ) -> Result<CapacityWrite> {
        let mut tx = self.pool.begin().await?;

        if !Self::lock_room(&mut tx, room_id).await? {
            return Ok(CapacityWrite::Missing);
        }
        if Self::count_bookings_for_room_in_tx(&mut tx, room_id).await? >= capacity {
            return Ok(CapacityWrite::RoomFull);
        }

        let Some(booking) = Self::create_booking_in_tx(&mut tx, room_id, user_id).await? else {
            return Ok(CapacityWrite::Missing);
        };

        tx.commit().await?;
        Ok(CapacityWrite::Written(booking))
    }

    /// 在单个事务中检查容量并换房
    pub async fn update_booking_room_within_capacity(
        &self,
        room_id: i64,
        booking_id: i64,
        capacity: i64,
    ) -> Result<CapacityWrite> {
        let mut tx = self.pool.begin().await?;

        if !Self::lock_room(&mut tx, room_id).await? {
            return Ok(CapacityWrite::Missing);
        }
        if Self::count_bookings_for_room_in_tx(&mut tx, room_id).await? >= capacity {
            return Ok(CapacityWrite::RoomFull);
        }

        let Some(booking) = Self::update_booking_room_in_tx(&mut tx, room_id, booking_id).await?
        else {
            return Ok(CapacityWrite::Missing);
        };

        tx.commit().await?;
        Ok(CapacityWrite::Written(booking))
    }

    // ==================== 事务操作 ====================

    /// 锁定房间行（FOR UPDATE），房间不存在时返回 false
    pub async fn lock_room(tx: &mut PgConnection, room_id: i64) -> Result<bool> {
        let locked: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM rooms WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(room_id)
        .fetch_optional(tx)
        .await?;

        Ok(locked.is_some())
    }

    /// 在事务中统计房间预订数
    pub async fn count_bookings_for_room_in_tx(tx: &mut PgConnection, room_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookings WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_one(tx)
        .await?;

        Ok(count)
    }

    /// 在事务中创建预订
    pub async fn create_booking_in_tx(
        tx: &mut PgConnection,
        room_id: i64,
        user_id: i64,
    ) -> Result<Option<Booking>> {
        let result = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, room_id)
            VALUES ($1, $2)
            RETURNING id, user_id, room_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(room_id)
        .fetch_one(tx)
        .await;

        foreign_key_as_none(result)
    }

    /// 在事务中修改预订的房间
    pub async fn update_booking_room_in_tx(
        tx: &mut PgConnection,
        room_id: i64,
        booking_id: i64,
    ) -> Result<Option<Booking>> {
        let result = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET room_id = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, user_id, room_id, created_at, updated_at
            "#,
        )
        .bind(room_id)
        .bind(booking_id)
        .fetch_optional(tx)
        .await;

        Ok(foreign_key_as_none(result)?.flatten())
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn find_booking_by_user(&self, user_id: i64) -> Result<Option<BookingWithRoom>> {
        self.find_booking_by_user(user_id).await
    }

    async fn find_booking_by_room(&self, room_id: i64) -> Result<Option<BookingWithRoom>> {
        self.find_booking_by_room(room_id).await
    }

    async fn find_booking_by_id(&self, booking_id: i64) -> Result<Option<Booking>> {
        self.find_booking_by_id(booking_id).await
    }

    async fn count_bookings_for_room(&self, room_id: i64) -> Result<i64> {
        self.count_bookings_for_room(room_id).await
    }

    async fn create_booking(&self, room_id: i64, user_id: i64) -> Result<Option<Booking>> {
        self.create_booking(room_id, user_id).await
    }

    async fn update_booking_room(
        &self,
        room_id: i64,
        booking_id: i64,
    ) -> Result<Option<Booking>> {
        self.update_booking_room(room_id, booking_id).await
    }

    async fn create_booking_within_capacity(
        &self,
        room_id: i64,
        user_id: i64,
        capacity: i64,
    ) -> Result<CapacityWrite> {
        self.create_booking_within_capacity(room_id, user_id, capacity)
            .await
    }

    async fn update_booking_room_within_capacity(
        &self,
        room_id: i64,
        booking_id: i64,
        capacity: i64,
    ) -> Result<CapacityWrite> {
        self.update_booking_room_within_capacity(room_id, booking_id, capacity)
            .await
    }
}
