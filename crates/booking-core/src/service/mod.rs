//! 服务层
//!
//! 实现预订规则，协调预订、报名、门票三个仓储。

pub mod booking_service;

pub use booking_service::{BookingLookup, BookingPolicy, BookingService, CapacityMode, is_eligible};
