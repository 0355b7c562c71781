//! 活动酒店预订核心库
//!
//! 参会者凭已支付的线下含住宿门票预订酒店房间，或将已有预订换到其他房间。
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义（NotFound / Forbidden 两类）
//! - `repository`: 仓储接口及 Postgres 实现；内存实现需启用 `test-utils` feature
//! - `service`: 预订规则

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{BookingError, ErrorKind, Result};
pub use models::*;
pub use repository::{
    BookingRepository, BookingRepositoryTrait, CapacityWrite, EnrollmentRepository,
    EnrollmentRepositoryTrait, TicketRepository, TicketRepositoryTrait,
};
#[cfg(feature = "test-utils")]
pub use repository::MemoryStore;
pub use service::{BookingLookup, BookingPolicy, BookingService, CapacityMode};
