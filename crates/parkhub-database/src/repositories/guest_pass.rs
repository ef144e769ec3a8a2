//! Guest pass repository implementation.

use sqlx::SqlitePool;

use parkhub_core::error::{AppError, ErrorKind};
use parkhub_core::result::AppResult;
use parkhub_core::types::{PassId, SlotId};
use parkhub_entity::pass::GuestPass;
use parkhub_entity::vehicle::VehicleType;

/// Row data for issuing a guest pass; assembled by the pass service.
#[derive(Debug, Clone)]
pub struct CreateGuestPass {
    /// Guest vehicle number plate.
    pub vehicle_number: String,
    /// Vehicle class.
    pub vehicle_type: VehicleType,
    /// Slot the pass binds.
    pub slot_id: SlotId,
    /// Issue timestamp (epoch ms).
    pub issue_time: i64,
    /// Expiry timestamp (epoch ms).
    pub expiry_time: i64,
    /// Guest contact phone.
    pub contact_phone: String,
    /// Guest contact email.
    pub contact_email: String,
    /// Unique pass code.
    pub pass_code: String,
}

/// Repository for guest passes.
#[derive(Debug, Clone)]
pub struct GuestPassRepository {
    pool: SqlitePool,
}

impl GuestPassRepository {
    /// Create a new guest pass repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new active pass, claiming its slot in the same
    /// transaction.
    ///
    /// Fails with a capacity error when another writer claimed the slot
    /// between the allocator read and this call; everything rolls back.
    pub async fn create(&self, data: &CreateGuestPass) -> AppResult<GuestPass> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let claimed = sqlx::query(
            "UPDATE parking_slots SET is_available = 0 \
             WHERE id = ? AND is_available = 1 AND is_reserved = 0",
        )
        .bind(data.slot_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim slot", e))?;

        if claimed.rows_affected() == 0 {
            return Err(AppError::capacity(format!(
                "Slot {} is not available",
                data.slot_id
            )));
        }

        let pass = sqlx::query_as::<_, GuestPass>(
            "INSERT INTO guest_passes \
             (vehicle_number, vehicle_type, slot_id, issue_time, expiry_time, \
              contact_phone, contact_email, pass_code, is_active) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1) \
             RETURNING *",
        )
        .bind(&data.vehicle_number)
        .bind(data.vehicle_type)
        .bind(data.slot_id)
        .bind(data.issue_time)
        .bind(data.expiry_time)
        .bind(&data.contact_phone)
        .bind(&data.contact_email)
        .bind(&data.pass_code)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Pass code '{}' already exists", data.pass_code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create guest pass", e),
        })?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit pass", e))?;

        Ok(pass)
    }

    /// Find a pass by primary key.
    pub async fn find_by_id(&self, id: PassId) -> AppResult<Option<GuestPass>> {
        sqlx::query_as::<_, GuestPass>("SELECT * FROM guest_passes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find pass", e))
    }

    /// First active, unexpired pass for a vehicle number.
    ///
    /// Lazy expiry: an expired pass simply fails the filter here; its
    /// row is not touched.
    pub async fn find_active_by_vehicle(
        &self,
        vehicle_number: &str,
        now_millis: i64,
    ) -> AppResult<Option<GuestPass>> {
        sqlx::query_as::<_, GuestPass>(
            "SELECT * FROM guest_passes \
             WHERE vehicle_number = ? AND is_active = 1 AND expiry_time > ? \
             ORDER BY id ASC LIMIT 1",
        )
        .bind(vehicle_number)
        .bind(now_millis)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find pass by vehicle", e)
        })
    }

    /// All active, unexpired passes.
    pub async fn find_all_valid(&self, now_millis: i64) -> AppResult<Vec<GuestPass>> {
        sqlx::query_as::<_, GuestPass>(
            "SELECT * FROM guest_passes \
             WHERE is_active = 1 AND expiry_time > ? \
             ORDER BY id ASC",
        )
        .bind(now_millis)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list valid passes", e))
    }

    /// Passes that are still flagged active but past expiry, for the
    /// opt-in expiry sweep.
    pub async fn find_expired_active(&self, now_millis: i64) -> AppResult<Vec<GuestPass>> {
        sqlx::query_as::<_, GuestPass>(
            "SELECT * FROM guest_passes \
             WHERE is_active = 1 AND expiry_time <= ? \
             ORDER BY id ASC",
        )
        .bind(now_millis)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list expired passes", e)
        })
    }

    /// Deactivate a pass and release its slot in one transaction.
    /// Safe to repeat: both writes are idempotent.
    pub async fn deactivate(&self, pass: &GuestPass) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("UPDATE guest_passes SET is_active = 0 WHERE id = ?")
            .bind(pass.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to deactivate pass", e)
            })?;

        sqlx::query("UPDATE parking_slots SET is_available = 1 WHERE id = ?")
            .bind(pass.slot_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to release pass slot", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit deactivation", e)
        })?;

        Ok(())
    }

    /// Whether a pass code is already in use.
    pub async fn code_exists(&self, pass_code: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guest_passes WHERE pass_code = ?")
            .bind(pass_code)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check pass code", e)
            })?;
        Ok(count > 0)
    }
}
