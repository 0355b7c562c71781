//! 活动酒店预订 HTTP 服务
//!
//! ## 模块结构
//!
//! - `auth`: JWT 生成与验证
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型及状态码映射
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 认证中间件
//! - `routes`: 路由与中间件装配
//! - `state`: 应用状态

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, Result};
pub use routes::build_router;
pub use state::AppState;
