//! Booking lifecycle service — creation, entry/exit capture, and
//! cancellation, with slot availability kept in lockstep.

use std::sync::Arc;

use tracing::info;

use parkhub_core::config::ParkingConfig;
use parkhub_core::error::AppError;
use parkhub_core::result::AppResult;
use parkhub_core::types::time::{minutes_between, now_millis, MILLIS_PER_MINUTE};
use parkhub_core::types::{BookingId, UserId};
use parkhub_database::repositories::{BookingRepository, SlotRepository};
use parkhub_entity::booking::{Booking, CreateBooking};

use crate::notification::NotificationSink;

/// Handles the booking lifecycle.
///
/// States move `active → completed` (verified exit or sweeper timeout)
/// or `active → cancelled`; both end states are terminal. Slot
/// availability transitions with the booking: creation claims the slot
/// inside the booking insert's transaction, completion and cancellation
/// release it.
#[derive(Clone)]
pub struct BookingService {
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Slot repository, for releases.
    slot_repo: Arc<SlotRepository>,
    /// Parking policy.
    policy: ParkingConfig,
    /// Fire-and-forget notification hooks.
    notifier: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService").finish()
    }
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        booking_repo: Arc<BookingRepository>,
        slot_repo: Arc<SlotRepository>,
        policy: ParkingConfig,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            booking_repo,
            slot_repo,
            policy,
            notifier,
        }
    }

    /// Create a booking for the given slot and expected window.
    ///
    /// The window must be forward (`entry < exit`) and no longer than
    /// the maximum permitted duration; exactly the maximum is accepted.
    /// The slot claim happens in the same transaction as the booking
    /// insert, so a concurrently taken slot fails cleanly with a
    /// capacity error and no partial write.
    pub async fn create_booking(&self, data: &CreateBooking) -> AppResult<Booking> {
        if data.expected_entry_time >= data.expected_exit_time {
            return Err(AppError::validation(
                "Expected entry time must be before expected exit time",
            ));
        }

        let window_ms = data.expected_exit_time - data.expected_entry_time;
        if window_ms > self.policy.max_duration_minutes * MILLIS_PER_MINUTE {
            return Err(AppError::validation(format!(
                "Booking window exceeds the maximum duration of {} minutes",
                self.policy.max_duration_minutes
            )));
        }

        let booking = self.booking_repo.create(data, now_millis()).await?;

        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            slot_id = %booking.slot_id,
            "Booking created"
        );
        self.notifier.booking_confirmed(&booking);

        Ok(booking)
    }

    /// Fetch a booking by ID.
    pub async fn get(&self, id: BookingId) -> AppResult<Booking> {
        self.booking_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))
    }

    /// All bookings for a user.
    pub async fn bookings_for_user(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        self.booking_repo.find_by_user(user_id).await
    }

    /// First active booking for a registered vehicle number, or `None`.
    pub async fn find_active_by_vehicle(&self, vehicle_number: &str) -> AppResult<Option<Booking>> {
        self.booking_repo.find_active_by_vehicle(vehicle_number).await
    }

    /// Record the verified entry timestamp. The latest call wins.
    pub async fn record_entry(&self, id: BookingId, entry_time: i64) -> AppResult<()> {
        self.booking_repo.set_entry_time(id, entry_time).await?;
        info!(booking_id = %id, entry_time, "Entry recorded");
        Ok(())
    }

    /// Record the verified exit, complete the booking, and release its
    /// slot. Returns the computed stay length in minutes.
    ///
    /// Fails with a validation error — and leaves the booking untouched —
    /// when no entry was ever recorded. Fails with a conflict when the
    /// booking already left the active state (for instance, the sweeper
    /// force-completed it first).
    pub async fn record_exit(&self, id: BookingId, exit_time: i64) -> AppResult<i64> {
        let booking = self.get(id).await?;

        if !booking.has_entry() {
            return Err(AppError::validation(format!(
                "Booking {id} has no recorded entry; exit not recorded"
            )));
        }

        let duration = minutes_between(booking.entry_time, exit_time);
        let completed = self.booking_repo.complete(id, exit_time, duration).await?;
        if !completed {
            return Err(AppError::conflict(format!(
                "Booking {id} is no longer active"
            )));
        }

        self.slot_repo.release(booking.slot_id).await?;

        info!(
            booking_id = %id,
            duration_minutes = duration,
            "Exit recorded, slot released"
        );
        Ok(duration)
    }

    /// Cancel an active booking and release its slot.
    pub async fn cancel_booking(&self, id: BookingId) -> AppResult<()> {
        let booking = self.get(id).await?;

        let cancelled = self.booking_repo.cancel(id).await?;
        if !cancelled {
            return Err(AppError::conflict(format!(
                "Booking {id} is no longer active"
            )));
        }

        self.slot_repo.release(booking.slot_id).await?;

        info!(booking_id = %id, slot_id = %booking.slot_id, "Booking cancelled, slot released");
        Ok(())
    }
}
