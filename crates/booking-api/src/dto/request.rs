//! 请求 DTO 定义

use serde::Deserialize;

/// 创建预订 / 换房请求体
///
/// `roomId` 不做范围校验，不存在的房间由业务层按存在性规则处理。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingBody {
    pub room_id: i64,
}
