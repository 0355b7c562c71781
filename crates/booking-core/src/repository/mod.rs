//! 数据库仓储层
//!
//! - 仓储只负责数据读写，不包含预订规则
//! - 每个方法是一次独立的数据库往返，容量校验的原子写入除外
//! - 定义 trait 接口以支持 mock 测试

mod booking_repo;
mod enrollment_repo;
#[cfg(feature = "test-utils")]
mod memory;
mod ticket_repo;
mod traits;

pub use booking_repo::BookingRepository;
pub use enrollment_repo::EnrollmentRepository;
#[cfg(feature = "test-utils")]
pub use memory::MemoryStore;
pub use ticket_repo::TicketRepository;
pub use traits::*;
