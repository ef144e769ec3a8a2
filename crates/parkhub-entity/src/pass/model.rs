//! Guest pass entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parkhub_core::types::{PassId, SlotId};

use crate::vehicle::VehicleType;

/// A time-boxed allocation for a non-account-holder vehicle, bound to
/// one slot.
///
/// A pass stays `is_active` until explicit deactivation; expiry is lazy —
/// lookups treat an expired pass as inactive, but the row is not mutated
/// and the slot is not released until deactivation or an explicit expiry
/// sweep.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GuestPass {
    /// Unique pass identifier.
    pub id: PassId,
    /// Guest vehicle number plate.
    pub vehicle_number: String,
    /// Vehicle class.
    pub vehicle_type: VehicleType,
    /// The slot bound to this pass.
    pub slot_id: SlotId,
    /// Issue timestamp (epoch ms).
    pub issue_time: i64,
    /// Expiry timestamp (epoch ms), issue + validity window.
    pub expiry_time: i64,
    /// Guest contact phone.
    pub contact_phone: String,
    /// Guest contact email (may be empty).
    pub contact_email: String,
    /// Unique 6-character pass code.
    pub pass_code: String,
    /// Whether the pass has been deactivated.
    pub is_active: bool,
}

impl GuestPass {
    /// Whether the pass has outlived its validity window.
    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.expiry_time <= now_millis
    }

    /// Active and still inside the validity window.
    pub fn is_valid(&self, now_millis: i64) -> bool {
        self.is_active && !self.is_expired(now_millis)
    }
}
