//! 应用状态定义

use std::sync::Arc;

use booking_core::BookingService;
use booking_shared::database::Database;

use crate::auth::JwtManager;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub booking_service: Arc<BookingService>,
    pub jwt_manager: Arc<JwtManager>,
    /// 使用内存仓储时为 None
    pub database: Option<Database>,
}

impl AppState {
    pub fn new(booking_service: Arc<BookingService>, jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            booking_service,
            jwt_manager,
            database: None,
        }
    }

    /// 挂载数据库，供就绪探针检查
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }
}
