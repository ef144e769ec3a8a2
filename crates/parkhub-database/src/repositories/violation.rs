//! Violation repository implementation.

use sqlx::SqlitePool;

use parkhub_core::error::{AppError, ErrorKind};
use parkhub_core::result::AppResult;
use parkhub_core::types::{UserId, ViolationId};
use parkhub_entity::violation::{CreateViolation, Violation, ViolationStatus};

/// Repository for the violation ledger.
///
/// Recording a violation and debiting the offender's balance are one
/// transaction: no state exists where the row was inserted but the debit
/// did not apply, or vice versa.
#[derive(Debug, Clone)]
pub struct ViolationRepository {
    pool: SqlitePool,
}

impl ViolationRepository {
    /// Create a new violation repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a violation and debit `penalty_amount` from the user's
    /// balance atomically.
    ///
    /// When `allow_negative_balance` is false, the balance clamps at
    /// zero instead of going negative. A missing user rolls the whole
    /// operation back.
    pub async fn create_with_debit(
        &self,
        data: &CreateViolation,
        allow_negative_balance: bool,
    ) -> AppResult<Violation> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let debit_query = if allow_negative_balance {
            "UPDATE users SET salary = salary - ? WHERE id = ?"
        } else {
            "UPDATE users SET salary = MAX(salary - ?, 0.0) WHERE id = ?"
        };

        let debited = sqlx::query(debit_query)
            .bind(data.penalty_amount)
            .bind(data.user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to debit penalty", e)
            })?;

        if debited.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "User {} not found for penalty debit",
                data.user_id
            )));
        }

        let violation = sqlx::query_as::<_, Violation>(
            "INSERT INTO violations \
             (user_id, vehicle_number, violation_type, penalty_amount, violation_date, \
              description, status) \
             VALUES (?, ?, ?, ?, ?, ?, 'pending') \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.vehicle_number)
        .bind(&data.violation_type)
        .bind(data.penalty_amount)
        .bind(data.violation_date)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record violation", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit violation", e)
        })?;

        Ok(violation)
    }

    /// Find a violation by primary key.
    pub async fn find_by_id(&self, id: ViolationId) -> AppResult<Option<Violation>> {
        sqlx::query_as::<_, Violation>("SELECT * FROM violations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find violation", e))
    }

    /// Violations for one user, in storage order.
    pub async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Violation>> {
        sqlx::query_as::<_, Violation>(
            "SELECT * FROM violations WHERE user_id = ? ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user violations", e)
        })
    }

    /// The full ledger, in storage order.
    pub async fn find_all(&self) -> AppResult<Vec<Violation>> {
        sqlx::query_as::<_, Violation>("SELECT * FROM violations ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list violations", e)
            })
    }

    /// Violation count for a vehicle number.
    pub async fn count_by_vehicle(&self, vehicle_number: &str) -> AppResult<u32> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM violations WHERE vehicle_number = ?")
                .bind(vehicle_number)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count violations", e)
                })?;
        Ok(count as u32)
    }

    /// Update the settlement status, the only mutable field.
    pub async fn update_status(&self, id: ViolationId, status: ViolationStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE violations SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update violation status", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Violation {id} not found")));
        }
        Ok(())
    }
}
