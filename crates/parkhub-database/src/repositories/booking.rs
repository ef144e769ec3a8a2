//! Booking repository implementation.

use sqlx::SqlitePool;

use parkhub_core::error::{AppError, ErrorKind};
use parkhub_core::result::AppResult;
use parkhub_core::types::{BookingId, UserId};
use parkhub_entity::booking::{Booking, CreateBooking};

/// Repository for booking CRUD and lifecycle transitions.
///
/// Status transitions out of `active` are single-row conditional updates
/// so that a racing sweeper and a manual exit cannot both process the
/// same booking.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new active booking, claiming its slot in the same
    /// transaction.
    ///
    /// The claim is conditional on the slot being available and not
    /// reserved; when another writer took the slot first, the whole
    /// operation rolls back and fails with a capacity error.
    pub async fn create(&self, data: &CreateBooking, booking_date: i64) -> AppResult<Booking> {
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

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO user_bookings \
             (user_id, slot_id, booking_date, expected_entry_time, expected_exit_time, \
              status, vehicle_type) \
             VALUES (?, ?, ?, ?, ?, 'active', ?) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.slot_id)
        .bind(booking_date)
        .bind(data.expected_entry_time)
        .bind(data.expected_exit_time)
        .bind(data.vehicle_type)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create booking", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        Ok(booking)
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: BookingId) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM user_bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking by id", e)
            })
    }

    /// All bookings belonging to a user, in storage order.
    pub async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM user_bookings WHERE user_id = ? ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user bookings", e))
    }

    /// Active bookings with a recorded entry, the overstay sweep's scan set.
    pub async fn find_active_entered(&self) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM user_bookings \
             WHERE status = 'active' AND entry_time > 0 \
             ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active bookings", e)
        })
    }

    /// First active booking for a vehicle number, joined through the
    /// owner's approved registration request.
    pub async fn find_active_by_vehicle(&self, vehicle_number: &str) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM user_bookings b \
             JOIN parking_requests r ON b.user_id = r.user_id \
             WHERE r.vehicle_number = ? AND r.status = 'approved' AND b.status = 'active' \
             ORDER BY b.id ASC LIMIT 1",
        )
        .bind(vehicle_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find booking by vehicle", e)
        })
    }

    /// Record the verified entry timestamp. The latest call wins.
    pub async fn set_entry_time(&self, id: BookingId, entry_time: i64) -> AppResult<()> {
        let result = sqlx::query("UPDATE user_bookings SET entry_time = ? WHERE id = ?")
            .bind(entry_time)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to set entry time", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Booking {id} not found")));
        }
        Ok(())
    }

    /// Complete an active booking with the given exit time and duration.
    ///
    /// Returns `false` when the booking was not active anymore — the
    /// caller lost the race against another completion and must not
    /// release the slot or emit a violation.
    pub async fn complete(
        &self,
        id: BookingId,
        exit_time: i64,
        duration_minutes: i64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE user_bookings \
             SET status = 'completed', exit_time = ?, duration = ? \
             WHERE id = ? AND status = 'active'",
        )
        .bind(exit_time)
        .bind(duration_minutes)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete booking", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Cancel an active booking. Returns `false` when it was already in
    /// a terminal state.
    pub async fn cancel(&self, id: BookingId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE user_bookings SET status = 'cancelled' \
             WHERE id = ? AND status = 'active'",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel booking", e))?;

        Ok(result.rows_affected() > 0)
    }
}
