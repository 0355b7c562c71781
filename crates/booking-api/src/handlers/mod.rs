//! HTTP 请求处理器

pub mod booking;
pub mod health;
