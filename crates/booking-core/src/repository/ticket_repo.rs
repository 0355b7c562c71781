//! 门票仓储（只读）

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::TicketRepositoryTrait;
use crate::error::Result;
use crate::models::{Ticket, TicketStatus, TicketType};

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    enrollment_id: i64,
    ticket_type_id: i64,
    status: TicketStatus,
    type_name: String,
    price: i32,
    is_remote: bool,
    includes_hotel: bool,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Self {
            id: row.id,
            enrollment_id: row.enrollment_id,
            ticket_type_id: row.ticket_type_id,
            status: row.status,
            ticket_type: TicketType {
                id: row.ticket_type_id,
                name: row.type_name,
                price: row.price,
                is_remote: row.is_remote,
                includes_hotel: row.includes_hotel,
            },
        }
    }
}

pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 查询报名关联的门票（含门票类型）
    pub async fn find_ticket_by_enrollment_id(&self, enrollment_id: i64) -> Result<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(
            r#"
            SELECT t.id, t.enrollment_id, t.ticket_type_id, t.status,
                   tt.name AS type_name, tt.price, tt.is_remote, tt.includes_hotel
            FROM tickets t
            JOIN ticket_types tt ON tt.id = t.ticket_type_id
            WHERE t.enrollment_id = $1
            "#,
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl TicketRepositoryTrait for TicketRepository {
    async fn find_ticket_by_enrollment_id(&self, enrollment_id: i64) -> Result<Option<Ticket>> {
        self.find_ticket_by_enrollment_id(enrollment_id).await
    }
}
