//! Violation ledger service — records violations with their penalty
//! debit.

use std::sync::Arc;

use tracing::info;

use parkhub_core::config::ParkingConfig;
use parkhub_core::result::AppResult;
use parkhub_core::types::{UserId, ViolationId};
use parkhub_database::repositories::ViolationRepository;
use parkhub_entity::violation::{CreateViolation, Violation, ViolationStatus};

/// Records violations and answers ledger queries.
///
/// Recording debits the penalty from the offending user's balance in the
/// same transaction as the insert; the two writes cannot diverge.
#[derive(Debug, Clone)]
pub struct ViolationService {
    /// Violation repository.
    violation_repo: Arc<ViolationRepository>,
    /// Parking policy (balance floor behavior).
    policy: ParkingConfig,
}

impl ViolationService {
    /// Creates a new violation service.
    pub fn new(violation_repo: Arc<ViolationRepository>, policy: ParkingConfig) -> Self {
        Self {
            violation_repo,
            policy,
        }
    }

    /// Record a violation, debiting the penalty atomically.
    pub async fn record(&self, data: &CreateViolation) -> AppResult<Violation> {
        let violation = self
            .violation_repo
            .create_with_debit(data, self.policy.allow_negative_balance)
            .await?;

        info!(
            violation_id = %violation.id,
            user_id = %violation.user_id,
            violation_type = %violation.violation_type,
            penalty = violation.penalty_amount,
            "Violation recorded, penalty debited"
        );
        Ok(violation)
    }

    /// Violations for one user, in storage order.
    pub async fn list_by_user(&self, user_id: UserId) -> AppResult<Vec<Violation>> {
        self.violation_repo.find_by_user(user_id).await
    }

    /// The full ledger, in storage order.
    pub async fn list_all(&self) -> AppResult<Vec<Violation>> {
        self.violation_repo.find_all().await
    }

    /// Update a violation's settlement status.
    pub async fn update_status(&self, id: ViolationId, status: ViolationStatus) -> AppResult<()> {
        self.violation_repo.update_status(id, status).await
    }
}
