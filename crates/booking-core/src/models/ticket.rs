//! 门票实体定义

use serde::{Deserialize, Serialize};

use super::enums::TicketStatus;

/// 门票类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: i64,
    pub name: String,
    /// 价格（分）
    pub price: i32,
    /// 线上参会
    pub is_remote: bool,
    /// 含酒店住宿
    pub includes_hotel: bool,
}

/// 门票（含门票类型）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub enrollment_id: i64,
    pub ticket_type_id: i64,
    pub status: TicketStatus,
    pub ticket_type: TicketType,
}

impl Ticket {
    /// 已支付、线下且含住宿的门票才可预订酒店
    pub fn grants_hotel_access(&self) -> bool {
        self.status == TicketStatus::Paid
            && !self.ticket_type.is_remote
            && self.ticket_type.includes_hotel
    }
}
