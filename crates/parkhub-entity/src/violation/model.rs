//! Violation entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parkhub_core::types::{UserId, ViolationId};

use super::status::ViolationStatus;

/// Violation type emitted by the overstay sweeper.
pub const VIOLATION_TYPE_OVERSTAY: &str = "overstay";

/// A recorded parking violation.
///
/// Recording a violation always debits the penalty from the offending
/// user's balance; the two writes happen in one transaction. Immutable
/// once created except for `status`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Violation {
    /// Unique violation identifier.
    pub id: ViolationId,
    /// The offending user.
    pub user_id: UserId,
    /// Vehicle number plate involved.
    pub vehicle_number: String,
    /// Free-form violation category, e.g. `"overstay"`.
    pub violation_type: String,
    /// Monetary penalty applied.
    pub penalty_amount: f64,
    /// When the violation occurred (epoch ms).
    pub violation_date: i64,
    /// Human-readable description.
    pub description: String,
    /// Settlement state.
    pub status: ViolationStatus,
}

/// Data required to record a new violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateViolation {
    /// The offending user.
    pub user_id: UserId,
    /// Vehicle number plate involved.
    pub vehicle_number: String,
    /// Violation category.
    pub violation_type: String,
    /// Penalty to debit.
    pub penalty_amount: f64,
    /// When the violation occurred (epoch ms).
    pub violation_date: i64,
    /// Human-readable description.
    pub description: String,
}
