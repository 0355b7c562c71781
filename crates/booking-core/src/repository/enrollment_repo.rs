//! 报名仓储（只读）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::traits::EnrollmentRepositoryTrait;
use crate::error::Result;
use crate::models::{Address, EnrollmentWithAddress};

/// 报名 LEFT JOIN 地址的查询结果，未填写地址时地址列全部为 NULL
#[derive(sqlx::FromRow)]
struct EnrollmentAddressRow {
    id: i64,
    user_id: i64,
    name: String,
    cpf: String,
    birthday: DateTime<Utc>,
    phone: String,
    address_id: Option<i64>,
    cep: Option<String>,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    number: Option<String>,
    neighborhood: Option<String>,
    address_detail: Option<String>,
}

impl From<EnrollmentAddressRow> for EnrollmentWithAddress {
    fn from(row: EnrollmentAddressRow) -> Self {
        let address = row.address_id.map(|address_id| Address {
            id: address_id,
            enrollment_id: row.id,
            cep: row.cep.unwrap_or_default(),
            street: row.street.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            state: row.state.unwrap_or_default(),
            number: row.number.unwrap_or_default(),
            neighborhood: row.neighborhood.unwrap_or_default(),
            address_detail: row.address_detail,
        });

        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            cpf: row.cpf,
            birthday: row.birthday,
            phone: row.phone,
            address,
        }
    }
}

pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 查询用户的报名信息及地址
    pub async fn find_enrollment_with_address_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<EnrollmentWithAddress>> {
        let row = sqlx::query_as::<_, EnrollmentAddressRow>(
            r#"
            SELECT e.id, e.user_id, e.name, e.cpf, e.birthday, e.phone,
                   a.id AS address_id, a.cep, a.street, a.city, a.state,
                   a.number, a.neighborhood, a.address_detail
            FROM enrollments e
            LEFT JOIN addresses a ON a.enrollment_id = e.id
            WHERE e.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl EnrollmentRepositoryTrait for EnrollmentRepository {
    async fn find_enrollment_with_address_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<EnrollmentWithAddress>> {
        self.find_enrollment_with_address_by_user_id(user_id).await
    }
}
