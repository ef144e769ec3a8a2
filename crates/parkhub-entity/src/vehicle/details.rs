//! Vehicle lookup result union.

use serde::{Deserialize, Serialize};

use parkhub_core::types::UserId;

use crate::booking::Booking;
use crate::pass::GuestPass;
use crate::vehicle::VehicleType;

/// Everything the system knows about a number plate, as one tagged union.
///
/// Lookups fall into exactly one arm: a registered vehicle (approved
/// request exists), a guest currently holding a valid pass, or an
/// unknown plate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VehicleDetails {
    /// The plate belongs to an approved registration.
    Registered {
        /// Registered vehicle class.
        vehicle_type: VehicleType,
        /// The registered owner.
        user_id: UserId,
        /// How many violations this plate has accumulated.
        violation_count: u32,
        /// The owner's active booking, if one exists.
        current_booking: Option<Booking>,
    },
    /// The plate holds a currently valid guest pass.
    Guest {
        /// The valid pass.
        pass: GuestPass,
    },
    /// The plate is unknown to the system.
    Unregistered,
}

impl VehicleDetails {
    /// Whether the plate is registered.
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }
}
