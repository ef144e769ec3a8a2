//! ParkHub Server — Campus Parking Management Engine
//!
//! Main entry point that wires all crates together, starts the overstay
//! sweeper, and runs until interrupted.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use parkhub_core::config::AppConfig;
use parkhub_core::error::AppError;
use parkhub_database::repositories::{
    BookingRepository, RequestRepository, SlotRepository, ViolationRepository,
};
use parkhub_database::DatabasePool;
use parkhub_service::ViolationService;
use parkhub_worker::{OverstaySweep, SweeperHandle};

#[tokio::main]
async fn main() {
    let env = std::env::var("PARKHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ParkHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    parkhub_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Seed fixed inventory and bootstrap admin ─────────
    parkhub_database::seed::ensure_default_inventory(db.pool()).await?;
    parkhub_database::seed::ensure_admin_account(db.pool()).await?;

    // ── Step 3: Repositories ─────────────────────────────────────
    let slot_repo = Arc::new(SlotRepository::new(db.pool().clone()));
    let booking_repo = Arc::new(BookingRepository::new(db.pool().clone()));
    let request_repo = Arc::new(RequestRepository::new(db.pool().clone()));
    let violation_repo = Arc::new(ViolationRepository::new(db.pool().clone()));

    // ── Step 4: Overstay sweeper ─────────────────────────────────
    let violations = ViolationService::new(Arc::clone(&violation_repo), config.parking.clone());
    let sweep = Arc::new(OverstaySweep::new(
        Arc::clone(&booking_repo),
        Arc::clone(&slot_repo),
        Arc::clone(&request_repo),
        violations,
        config.parking.clone(),
    ));

    let mut sweeper = SweeperHandle::new();
    if config.sweeper.enabled {
        sweeper.start(sweep, Duration::from_secs(config.sweeper.interval_seconds));
    } else {
        tracing::info!("Overstay sweeper disabled by configuration");
    }

    tracing::info!("ParkHub is ready");

    // ── Step 5: Run until interrupted ────────────────────────────
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;

    tracing::info!("Shutdown signal received");
    sweeper.stop().await;
    db.close().await;

    tracing::info!("ParkHub stopped");
    Ok(())
}
