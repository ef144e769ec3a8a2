//! Booking entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parkhub_core::types::{BookingId, SlotId, UserId};

use super::status::BookingStatus;
use crate::vehicle::VehicleType;

/// A user's claim on a slot for an expected time window, with real
/// entry/exit capture.
///
/// Timestamps are epoch milliseconds; `entry_time` and `exit_time` use
/// `0` to mean "not yet recorded". `duration` is whole minutes and is
/// computed only once both entry and exit exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// Owning user.
    pub user_id: UserId,
    /// The claimed slot.
    pub slot_id: SlotId,
    /// When the booking was made.
    pub booking_date: i64,
    /// Verified entry timestamp, `0` when unset.
    pub entry_time: i64,
    /// Verified exit timestamp, `0` when unset.
    pub exit_time: i64,
    /// Planned entry timestamp.
    pub expected_entry_time: i64,
    /// Planned exit timestamp.
    pub expected_exit_time: i64,
    /// Current lifecycle state.
    pub status: BookingStatus,
    /// Vehicle class for the stay.
    pub vehicle_type: VehicleType,
    /// Computed stay length in minutes (0 until completed).
    pub duration: i64,
}

impl Booking {
    /// Whether the booking still holds its slot.
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    /// Whether a verified entry has been captured.
    pub fn has_entry(&self) -> bool {
        self.entry_time > 0
    }
}

/// Data required to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// The booking user.
    pub user_id: UserId,
    /// The slot to claim.
    pub slot_id: SlotId,
    /// Planned entry timestamp (epoch ms).
    pub expected_entry_time: i64,
    /// Planned exit timestamp (epoch ms).
    pub expected_exit_time: i64,
    /// Vehicle class for the stay.
    pub vehicle_type: VehicleType,
}
