//! Parking slot entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parkhub_core::types::SlotId;

use super::zone::Zone;
use crate::vehicle::VehicleType;

/// A single physical parking space.
///
/// Slots are created at initialization (the seeded fixed inventory) or by
/// admin action, and are never deleted in normal operation. Availability
/// is flipped in lockstep with booking and guest-pass state. A reserved
/// slot is earmarked for a named purpose and is never handed out by the
/// allocator regardless of its availability flag.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Slot {
    /// Unique slot identifier.
    pub id: SlotId,
    /// Human-facing slot number, e.g. `"P7"`. Unique.
    pub slot_number: String,
    /// Physical location description, e.g. `"Block A"`.
    pub location: String,
    /// Whether the slot is currently free to allocate.
    pub is_available: bool,
    /// Which vehicle class fits this slot.
    pub vehicle_type: VehicleType,
    /// Campus zone the slot sits in.
    pub zone: Zone,
    /// Whether the slot is excluded from general allocation.
    pub is_reserved: bool,
    /// Who a reserved slot is earmarked for (empty when unreserved).
    pub reserved_for: String,
}

impl Slot {
    /// Whether the allocator may hand this slot out.
    pub fn is_allocatable(&self) -> bool {
        self.is_available && !self.is_reserved
    }
}

/// Data required to create a new slot (admin action or seeding).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlot {
    /// Human-facing slot number. Must be unique.
    pub slot_number: String,
    /// Physical location description.
    pub location: String,
    /// Vehicle class the slot accepts.
    pub vehicle_type: VehicleType,
    /// Campus zone.
    pub zone: Zone,
    /// Whether the slot starts available.
    pub is_available: bool,
    /// Whether the slot is reserved for a named purpose.
    pub is_reserved: bool,
    /// The named purpose for a reserved slot.
    pub reserved_for: String,
}

impl CreateSlot {
    /// A regular allocatable slot.
    pub fn open(
        slot_number: impl Into<String>,
        location: impl Into<String>,
        vehicle_type: VehicleType,
        zone: Zone,
    ) -> Self {
        Self {
            slot_number: slot_number.into(),
            location: location.into(),
            vehicle_type,
            zone,
            is_available: true,
            is_reserved: false,
            reserved_for: String::new(),
        }
    }

    /// A reserved slot, earmarked and excluded from allocation.
    pub fn reserved(
        slot_number: impl Into<String>,
        location: impl Into<String>,
        vehicle_type: VehicleType,
        zone: Zone,
        reserved_for: impl Into<String>,
    ) -> Self {
        Self {
            slot_number: slot_number.into(),
            location: location.into(),
            vehicle_type,
            zone,
            is_available: false,
            is_reserved: true,
            reserved_for: reserved_for.into(),
        }
    }
}
