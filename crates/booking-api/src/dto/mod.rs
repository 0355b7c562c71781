//! 请求与响应 DTO

pub mod request;
pub mod response;

pub use request::BookingBody;
pub use response::{BookingIdResponse, BookingResponse, CreatedBookingResponse};
