//! Overstay enforcement sweep.

use std::sync::Arc;

use tracing::{info, warn};

use parkhub_core::config::ParkingConfig;
use parkhub_core::result::AppResult;
use parkhub_core::types::time::{minutes_between, now_millis};
use parkhub_database::repositories::{BookingRepository, RequestRepository, SlotRepository};
use parkhub_entity::booking::Booking;
use parkhub_entity::violation::{CreateViolation, VIOLATION_TYPE_OVERSTAY};
use parkhub_service::ViolationService;

/// Outcome of one sweep cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepReport {
    /// Active entered bookings examined.
    pub scanned: usize,
    /// Bookings force-completed and slots released.
    pub released: usize,
    /// Overstay violations recorded.
    pub violations: usize,
    /// Bookings whose processing failed.
    pub failed: usize,
}

/// Scans active bookings with a recorded entry and force-completes any
/// past the maximum permitted duration.
///
/// The completion is a winner-takes-all conditional transition, so a
/// manual exit racing the sweep is processed exactly once. A violation
/// is recorded only when an approved registration resolves a vehicle
/// number for the booking's user; otherwise only the booking and slot
/// change. One booking's failure never aborts the rest of the scan.
#[derive(Clone)]
pub struct OverstaySweep {
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Slot repository, for releases.
    slot_repo: Arc<SlotRepository>,
    /// Request repository, for vehicle number resolution.
    request_repo: Arc<RequestRepository>,
    /// Violation ledger.
    violations: ViolationService,
    /// Parking policy.
    policy: ParkingConfig,
}

impl std::fmt::Debug for OverstaySweep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverstaySweep").finish()
    }
}

impl OverstaySweep {
    /// Creates a new overstay sweep.
    pub fn new(
        booking_repo: Arc<BookingRepository>,
        slot_repo: Arc<SlotRepository>,
        request_repo: Arc<RequestRepository>,
        violations: ViolationService,
        policy: ParkingConfig,
    ) -> Self {
        Self {
            booking_repo,
            slot_repo,
            request_repo,
            violations,
            policy,
        }
    }

    /// Run one sweep cycle.
    pub async fn run_once(&self) -> AppResult<SweepReport> {
        let now = now_millis();
        let bookings = self.booking_repo.find_active_entered().await?;

        let mut report = SweepReport {
            scanned: bookings.len(),
            ..SweepReport::default()
        };

        for booking in &bookings {
            match self.process(booking, now).await {
                Ok(Some(violated)) => {
                    report.released += 1;
                    if violated {
                        report.violations += 1;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        booking_id = %booking.id,
                        error = %e,
                        "Overstay processing failed; continuing with remaining bookings"
                    );
                }
            }
        }

        if report.released > 0 || report.failed > 0 {
            info!(
                scanned = report.scanned,
                released = report.released,
                violations = report.violations,
                failed = report.failed,
                "Overstay sweep cycle finished"
            );
        }

        Ok(report)
    }

    /// Process one booking. `Ok(None)` means it was within limits or
    /// another writer completed it first; `Ok(Some(violated))` means the
    /// stay was force-completed, with `violated` telling whether a
    /// violation was recorded.
    async fn process(&self, booking: &Booking, now: i64) -> AppResult<Option<bool>> {
        let duration = minutes_between(booking.entry_time, now);
        if duration <= self.policy.max_duration_minutes {
            return Ok(None);
        }

        // Conditional transition: the loser of a race with a manual exit
        // must not release the slot or record a violation.
        let won = self.booking_repo.complete(booking.id, now, duration).await?;
        if !won {
            return Ok(None);
        }

        self.slot_repo.release(booking.slot_id).await?;

        let Some(vehicle_number) = self
            .request_repo
            .vehicle_number_for_user(booking.user_id)
            .await?
        else {
            info!(
                booking_id = %booking.id,
                user_id = %booking.user_id,
                "Overstayed booking released; no approved registration, violation skipped"
            );
            return Ok(Some(false));
        };

        let max_hours = self.policy.max_duration_minutes / 60;
        self.violations
            .record(&CreateViolation {
                user_id: booking.user_id,
                vehicle_number,
                violation_type: VIOLATION_TYPE_OVERSTAY.to_string(),
                penalty_amount: self.policy.overstay_penalty,
                violation_date: now,
                description: format!(
                    "Exceeded maximum parking duration of {max_hours} hours \
                     (actual: {} hours {} minutes)",
                    duration / 60,
                    duration % 60
                ),
            })
            .await?;

        Ok(Some(true))
    }
}
