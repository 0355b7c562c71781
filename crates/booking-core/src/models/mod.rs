//! 预订服务领域模型
//!
//! 包含预订、房间，以及只读引用的报名与门票实体

pub mod booking;
pub mod enrollment;
pub mod enums;
pub mod ticket;

// 重新导出常用类型
pub use booking::{Booking, BookingWithRoom, Room};
pub use enrollment::{Address, EnrollmentWithAddress};
pub use enums::TicketStatus;
pub use ticket::{Ticket, TicketType};
