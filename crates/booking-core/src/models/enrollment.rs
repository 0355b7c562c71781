//! 报名实体定义
//!
//! 报名与地址由报名服务维护，这里只读

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 报名地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    pub enrollment_id: i64,
    pub cep: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub number: String,
    pub neighborhood: String,
    #[sqlx(default)]
    pub address_detail: Option<String>,
}

/// 报名信息（含地址）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentWithAddress {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
    /// 未填写地址时为 None
    pub address: Option<Address>,
}

impl EnrollmentWithAddress {
    pub fn has_address(&self) -> bool {
        self.address.is_some()
    }
}
