//! 活动酒店预订服务
//!
//! 提供预订查询、创建和换房的 REST API。

use std::sync::Arc;

use booking_api::{auth::JwtManager, build_router, state::AppState};
use booking_core::{
    BookingPolicy, BookingRepository, BookingService, EnrollmentRepository, TicketRepository,
};
use booking_shared::{config::AppConfig, database::Database, observability};
use tokio::net::TcpListener;
use tracing::{info, warn};

const SERVICE_NAME: &str = "booking-api";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(SERVICE_NAME)?;
    let _guard = observability::init(&config.service_name, &config.observability).await?;

    info!("Starting {} on {}", config.service_name, config.server_addr());

    if config.auth.jwt_secret == booking_shared::config::AuthConfig::default().jwt_secret {
        if config.is_production() {
            anyhow::bail!("auth.jwt_secret must be set in production environment");
        }
        warn!("Using default JWT secret - set BOOKING_AUTH__JWT_SECRET for production");
    }

    let db = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        db.run_migrations().await?;
    }

    let policy = BookingPolicy::from(&config.booking);
    info!(
        room_capacity = policy.room_capacity,
        capacity_mode = ?policy.capacity_mode,
        enforce_ownership = policy.enforce_ownership,
        "Booking policy loaded"
    );

    let booking_service = Arc::new(BookingService::new(
        Arc::new(BookingRepository::new(db.pool().clone())),
        Arc::new(EnrollmentRepository::new(db.pool().clone())),
        Arc::new(TicketRepository::new(db.pool().clone())),
        policy,
    ));
    let jwt_manager = Arc::new(JwtManager::new(&config.auth));

    let state = AppState::new(booking_service, jwt_manager).with_database(db.clone());
    let app = build_router(state, &config.server);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 收到 SIGTERM 或 Ctrl+C 后停止接收新连接，等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
