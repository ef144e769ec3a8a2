//! Parking slot repository implementation.

use sqlx::SqlitePool;

use parkhub_core::error::{AppError, ErrorKind};
use parkhub_core::result::AppResult;
use parkhub_core::types::SlotId;
use parkhub_entity::slot::{CreateSlot, Slot, Zone};
use parkhub_entity::vehicle::VehicleType;

/// Repository for slot inventory CRUD and availability transitions.
///
/// Availability is always decided against the stored row: the claim and
/// release operations are single-row conditional updates, so two
/// concurrent claimants of the same slot serialize on the row and at
/// most one wins.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    /// Create a new slot repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a slot by primary key.
    pub async fn find_by_id(&self, id: SlotId) -> AppResult<Option<Slot>> {
        sqlx::query_as::<_, Slot>("SELECT * FROM parking_slots WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find slot by id", e))
    }

    /// First allocatable slot matching the filters, in storage (id) order.
    ///
    /// Reserved slots never match, regardless of their availability flag.
    pub async fn find_first_available(
        &self,
        vehicle_type: VehicleType,
        zone: Option<Zone>,
    ) -> AppResult<Option<Slot>> {
        let query = match zone {
            Some(_) => {
                "SELECT * FROM parking_slots \
                 WHERE is_available = 1 AND is_reserved = 0 AND vehicle_type = ? AND zone = ? \
                 ORDER BY id ASC LIMIT 1"
            }
            None => {
                "SELECT * FROM parking_slots \
                 WHERE is_available = 1 AND is_reserved = 0 AND vehicle_type = ? \
                 ORDER BY id ASC LIMIT 1"
            }
        };

        let mut q = sqlx::query_as::<_, Slot>(query).bind(vehicle_type);
        if let Some(zone) = zone {
            q = q.bind(zone);
        }

        q.fetch_optional(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find available slot", e)
        })
    }

    /// All allocatable slots matching the filters, in storage order.
    pub async fn find_available(
        &self,
        vehicle_type: VehicleType,
        zone: Option<Zone>,
    ) -> AppResult<Vec<Slot>> {
        let query = match zone {
            Some(_) => {
                "SELECT * FROM parking_slots \
                 WHERE is_available = 1 AND is_reserved = 0 AND vehicle_type = ? AND zone = ? \
                 ORDER BY id ASC"
            }
            None => {
                "SELECT * FROM parking_slots \
                 WHERE is_available = 1 AND is_reserved = 0 AND vehicle_type = ? \
                 ORDER BY id ASC"
            }
        };

        let mut q = sqlx::query_as::<_, Slot>(query).bind(vehicle_type);
        if let Some(zone) = zone {
            q = q.bind(zone);
        }

        q.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list available slots", e)
        })
    }

    /// List the entire inventory in storage order.
    pub async fn find_all(&self) -> AppResult<Vec<Slot>> {
        sqlx::query_as::<_, Slot>("SELECT * FROM parking_slots ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list slots", e))
    }

    /// List slots in a zone.
    pub async fn find_by_zone(&self, zone: Zone) -> AppResult<Vec<Slot>> {
        sqlx::query_as::<_, Slot>("SELECT * FROM parking_slots WHERE zone = ? ORDER BY id ASC")
            .bind(zone)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list slots by zone", e)
            })
    }

    /// List reserved slots.
    pub async fn find_reserved(&self) -> AppResult<Vec<Slot>> {
        sqlx::query_as::<_, Slot>(
            "SELECT * FROM parking_slots WHERE is_reserved = 1 ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reserved slots", e))
    }

    /// Create a new slot.
    pub async fn create(&self, data: &CreateSlot) -> AppResult<Slot> {
        sqlx::query_as::<_, Slot>(
            "INSERT INTO parking_slots \
             (slot_number, location, is_available, vehicle_type, zone, is_reserved, reserved_for) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(&data.slot_number)
        .bind(&data.location)
        .bind(data.is_available)
        .bind(data.vehicle_type)
        .bind(data.zone)
        .bind(data.is_reserved)
        .bind(&data.reserved_for)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Slot number '{}' already exists", data.slot_number))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create slot", e),
        })
    }

    /// Atomically claim a slot for a booking or pass.
    ///
    /// Returns `false` when the slot was already taken, reserved, or does
    /// not exist — the caller must re-read before trying another slot.
    pub async fn try_claim(&self, id: SlotId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE parking_slots SET is_available = 0 \
             WHERE id = ? AND is_available = 1 AND is_reserved = 0",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim slot", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Release a slot back to the available pool. Idempotent.
    pub async fn release(&self, id: SlotId) -> AppResult<()> {
        sqlx::query("UPDATE parking_slots SET is_available = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release slot", e))?;
        Ok(())
    }

    /// Available and total slot counts for a vehicle type.
    pub async fn counts_by_type(&self, vehicle_type: VehicleType) -> AppResult<(u32, u32)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM parking_slots WHERE vehicle_type = ?")
                .bind(vehicle_type)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count slots", e)
                })?;

        let available: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM parking_slots \
             WHERE vehicle_type = ? AND is_available = 1",
        )
        .bind(vehicle_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count available slots", e)
        })?;

        Ok((available as u32, total as u32))
    }
}
