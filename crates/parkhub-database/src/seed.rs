//! Idempotent first-run seeding of the default inventory and the
//! bootstrap admin account.

use sqlx::SqlitePool;
use tracing::info;

use parkhub_core::error::{AppError, ErrorKind};
use parkhub_core::result::AppResult;
use parkhub_entity::slot::{CreateSlot, Zone};
use parkhub_entity::user::{CreateUser, UserRole};
use parkhub_entity::vehicle::VehicleType;

use crate::repositories::{SlotRepository, UserRepository};

/// Seed the fixed slot inventory when the table is empty.
///
/// P1–P10 are 2-wheeler slots and P11–P15 are 4-wheeler slots, spread
/// round-robin over the campus zones; P16–P18 are reserved 4-wheeler
/// slots at the gate.
pub async fn ensure_default_inventory(pool: &SqlitePool) -> AppResult<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking_slots")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count slots", e))?;

    if existing > 0 {
        return Ok(());
    }

    let repo = SlotRepository::new(pool.clone());
    let zones = Zone::all();

    for i in 1..=10u32 {
        let zone = zones[((i - 1) % 3) as usize];
        let block = char::from(b'A' + ((i - 1) / 4) as u8);
        repo.create(&CreateSlot::open(
            format!("P{i}"),
            format!("Block {block}"),
            VehicleType::TwoWheeler,
            zone,
        ))
        .await?;
    }

    for i in 11..=15u32 {
        let zone = zones[((i - 11) % 3) as usize];
        let block = char::from(b'A' + ((i - 11) / 2) as u8);
        repo.create(&CreateSlot::open(
            format!("P{i}"),
            format!("Block {block}"),
            VehicleType::FourWheeler,
            zone,
        ))
        .await?;
    }

    let reserved = [("P16", "VC"), ("P17", "ambulance"), ("P18", "registrar")];
    for (slot_number, reserved_for) in reserved {
        repo.create(&CreateSlot::reserved(
            slot_number,
            "Reserved Area",
            VehicleType::FourWheeler,
            Zone::Gate,
            reserved_for,
        ))
        .await?;
    }

    info!("Seeded default slot inventory (18 slots)");
    Ok(())
}

/// Create the bootstrap admin account when missing.
pub async fn ensure_admin_account(pool: &SqlitePool) -> AppResult<()> {
    let repo = UserRepository::new(pool.clone());

    if repo.exists("admin").await? {
        return Ok(());
    }

    repo.create(&CreateUser {
        username: "admin".to_string(),
        password: "admin123".to_string(),
        role: UserRole::Admin,
        name: "Administrator".to_string(),
        email: "admin@campus.edu".to_string(),
        salary: 0.0,
    })
    .await?;

    info!("Created bootstrap admin account");
    Ok(())
}
