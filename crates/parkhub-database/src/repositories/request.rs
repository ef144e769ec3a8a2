//! Registration request repository implementation.

use sqlx::SqlitePool;

use parkhub_core::error::{AppError, ErrorKind};
use parkhub_core::result::AppResult;
use parkhub_core::types::{RequestId, UserId};
use parkhub_entity::request::{CreateRequest, DocumentKind, ParkingRequest, RequestStatus};

/// Repository for registration requests.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: SqlitePool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new pending request.
    pub async fn create(&self, data: &CreateRequest, request_date: i64) -> AppResult<ParkingRequest> {
        sqlx::query_as::<_, ParkingRequest>(
            "INSERT INTO parking_requests \
             (user_id, vehicle_number, vehicle_type, cv_book_path, rc_book_path, \
              driver_license_path, has_helmet, has_seat_belt, status, request_date) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.vehicle_number)
        .bind(data.vehicle_type)
        .bind(&data.cv_book_path)
        .bind(&data.rc_book_path)
        .bind(&data.driver_license_path)
        .bind(data.has_helmet)
        .bind(data.has_seat_belt)
        .bind(request_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))
    }

    /// Find a request by primary key.
    pub async fn find_by_id(&self, id: RequestId) -> AppResult<Option<ParkingRequest>> {
        sqlx::query_as::<_, ParkingRequest>("SELECT * FROM parking_requests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find request", e))
    }

    /// All requests in a given review state, in storage order.
    pub async fn find_by_status(&self, status: RequestStatus) -> AppResult<Vec<ParkingRequest>> {
        sqlx::query_as::<_, ParkingRequest>(
            "SELECT * FROM parking_requests WHERE status = ? ORDER BY id ASC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list requests by status", e)
        })
    }

    /// Pending requests submitted by one user.
    pub async fn find_pending_for_user(&self, user_id: UserId) -> AppResult<Vec<ParkingRequest>> {
        sqlx::query_as::<_, ParkingRequest>(
            "SELECT * FROM parking_requests \
             WHERE user_id = ? AND status = 'pending' ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending requests", e)
        })
    }

    /// First approved request for a vehicle number.
    pub async fn find_approved_by_vehicle(
        &self,
        vehicle_number: &str,
    ) -> AppResult<Option<ParkingRequest>> {
        sqlx::query_as::<_, ParkingRequest>(
            "SELECT * FROM parking_requests \
             WHERE vehicle_number = ? AND status = 'approved' \
             ORDER BY id ASC LIMIT 1",
        )
        .bind(vehicle_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find approved request", e)
        })
    }

    /// Registered vehicle number for a user, from their approved request.
    pub async fn vehicle_number_for_user(&self, user_id: UserId) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT vehicle_number FROM parking_requests \
             WHERE user_id = ? AND status = 'approved' \
             ORDER BY id ASC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve vehicle number", e)
        })
    }

    /// Whether a vehicle number has an approved registration.
    pub async fn is_vehicle_registered(&self, vehicle_number: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM parking_requests \
             WHERE vehicle_number = ? AND status = 'approved'",
        )
        .bind(vehicle_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check registration", e)
        })?;
        Ok(count > 0)
    }

    /// Move a pending request to a terminal state. Returns `false` when
    /// the request was not pending (terminal states admit no transition).
    pub async fn transition(&self, id: RequestId, to: RequestStatus) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE parking_requests SET status = ? WHERE id = ? AND status = 'pending'",
        )
        .bind(to)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to transition request", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Set one document's verification flag.
    pub async fn set_document_verified(
        &self,
        id: RequestId,
        document: DocumentKind,
        verified: bool,
    ) -> AppResult<()> {
        let query = match document {
            DocumentKind::License => {
                "UPDATE parking_requests SET license_verified = ? WHERE id = ?"
            }
            DocumentKind::Rc => "UPDATE parking_requests SET rc_verified = ? WHERE id = ?",
            DocumentKind::Cv => "UPDATE parking_requests SET cv_verified = ? WHERE id = ?",
        };

        let result = sqlx::query(query)
            .bind(verified)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mark document verified", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Request {id} not found")));
        }
        Ok(())
    }
}
