//! Registration request service — submission, review, and document
//! verification.

use std::sync::Arc;

use tracing::info;

use parkhub_core::error::AppError;
use parkhub_core::result::AppResult;
use parkhub_core::types::time::now_millis;
use parkhub_core::types::{RequestId, UserId};
use parkhub_database::repositories::RequestRepository;
use parkhub_entity::request::{CreateRequest, DocumentKind, ParkingRequest, RequestStatus};

/// Handles the registration request workflow.
///
/// Requests are pending until an admin approves or rejects them; both
/// outcomes are terminal, and re-submission is not modeled.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    /// Request repository.
    request_repo: Arc<RequestRepository>,
}

impl RegistrationService {
    /// Creates a new registration service.
    pub fn new(request_repo: Arc<RequestRepository>) -> Self {
        Self { request_repo }
    }

    /// Submit a new registration request.
    ///
    /// Document paths are stored as opaque strings; their content is
    /// never interpreted here.
    pub async fn submit(&self, data: &CreateRequest) -> AppResult<ParkingRequest> {
        if data.vehicle_number.trim().is_empty() {
            return Err(AppError::validation("Vehicle number cannot be empty"));
        }

        let request = self.request_repo.create(data, now_millis()).await?;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            vehicle = %request.vehicle_number,
            "Registration request submitted"
        );
        Ok(request)
    }

    /// Fetch a request by ID.
    pub async fn get(&self, id: RequestId) -> AppResult<ParkingRequest> {
        self.request_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))
    }

    /// Approve a pending request.
    pub async fn approve(&self, id: RequestId) -> AppResult<()> {
        self.transition(id, RequestStatus::Approved).await
    }

    /// Reject a pending request.
    pub async fn reject(&self, id: RequestId) -> AppResult<()> {
        self.transition(id, RequestStatus::Rejected).await
    }

    async fn transition(&self, id: RequestId, to: RequestStatus) -> AppResult<()> {
        // Distinguish a missing row from a terminal one for the caller.
        let request = self.get(id).await?;
        if request.status.is_terminal() {
            return Err(AppError::conflict(format!(
                "Request {id} was already {}",
                request.status
            )));
        }

        let moved = self.request_repo.transition(id, to).await?;
        if !moved {
            return Err(AppError::conflict(format!(
                "Request {id} is no longer pending"
            )));
        }

        info!(request_id = %id, status = %to, "Registration request reviewed");
        Ok(())
    }

    /// All pending requests.
    pub async fn pending(&self) -> AppResult<Vec<ParkingRequest>> {
        self.request_repo.find_by_status(RequestStatus::Pending).await
    }

    /// All approved requests.
    pub async fn approved(&self) -> AppResult<Vec<ParkingRequest>> {
        self.request_repo.find_by_status(RequestStatus::Approved).await
    }

    /// Pending requests submitted by one user.
    pub async fn pending_for_user(&self, user_id: UserId) -> AppResult<Vec<ParkingRequest>> {
        self.request_repo.find_pending_for_user(user_id).await
    }

    /// Set one document's verification flag.
    pub async fn mark_document_verified(
        &self,
        id: RequestId,
        document: DocumentKind,
        verified: bool,
    ) -> AppResult<()> {
        self.request_repo
            .set_document_verified(id, document, verified)
            .await
    }
}
