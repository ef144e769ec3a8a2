//! Vehicle lookup — everything the system knows about a number plate.

use std::sync::Arc;

use parkhub_core::result::AppResult;
use parkhub_core::types::time::now_millis;
use parkhub_database::repositories::{
    BookingRepository, GuestPassRepository, RequestRepository, ViolationRepository,
};
use parkhub_entity::vehicle::VehicleDetails;

/// Resolves a number plate to a [`VehicleDetails`] union: a registered
/// vehicle, a guest with a valid pass, or an unknown plate.
#[derive(Debug, Clone)]
pub struct VehicleLookup {
    /// Request repository, for the registration check.
    request_repo: Arc<RequestRepository>,
    /// Booking repository, for the owner's active booking.
    booking_repo: Arc<BookingRepository>,
    /// Violation repository, for the plate's history count.
    violation_repo: Arc<ViolationRepository>,
    /// Guest pass repository, for the guest arm.
    pass_repo: Arc<GuestPassRepository>,
}

impl VehicleLookup {
    /// Creates a new vehicle lookup.
    pub fn new(
        request_repo: Arc<RequestRepository>,
        booking_repo: Arc<BookingRepository>,
        violation_repo: Arc<ViolationRepository>,
        pass_repo: Arc<GuestPassRepository>,
    ) -> Self {
        Self {
            request_repo,
            booking_repo,
            violation_repo,
            pass_repo,
        }
    }

    /// Look up a plate. The input is untrusted text (it may come from
    /// the recognition collaborator); an unknown plate is a normal
    /// `Unregistered` result, not an error.
    pub async fn details(&self, vehicle_number: &str) -> AppResult<VehicleDetails> {
        if let Some(request) = self
            .request_repo
            .find_approved_by_vehicle(vehicle_number)
            .await?
        {
            let violation_count = self.violation_repo.count_by_vehicle(vehicle_number).await?;
            let current_booking = self
                .booking_repo
                .find_active_by_vehicle(vehicle_number)
                .await?;

            return Ok(VehicleDetails::Registered {
                vehicle_type: request.vehicle_type,
                user_id: request.user_id,
                violation_count,
                current_booking,
            });
        }

        if let Some(pass) = self
            .pass_repo
            .find_active_by_vehicle(vehicle_number, now_millis())
            .await?
        {
            return Ok(VehicleDetails::Guest { pass });
        }

        Ok(VehicleDetails::Unregistered)
    }
}
