//! Guest pass service — issuance, deactivation, and lookup of
//! time-boxed slot allocations for non-account-holder vehicles.

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use parkhub_core::config::ParkingConfig;
use parkhub_core::error::{AppError, ErrorKind};
use parkhub_core::result::AppResult;
use parkhub_core::types::time::now_millis;
use parkhub_core::types::PassId;
use parkhub_database::repositories::guest_pass::CreateGuestPass;
use parkhub_database::repositories::{GuestPassRepository, RequestRepository, SlotRepository};
use parkhub_entity::pass::GuestPass;
use parkhub_entity::vehicle::VehicleType;

use crate::notification::NotificationSink;

/// Characters allowed in a pass code.
const PASS_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Pass code length.
const PASS_CODE_LEN: usize = 6;

/// Attempts before giving up on finding an unused pass code.
const PASS_CODE_ATTEMPTS: usize = 16;

/// Issues, deactivates, and looks up guest passes.
#[derive(Clone)]
pub struct GuestPassService {
    /// Guest pass repository.
    pass_repo: Arc<GuestPassRepository>,
    /// Slot repository, for allocation reads.
    slot_repo: Arc<SlotRepository>,
    /// Request repository, for the registered-vehicle check.
    request_repo: Arc<RequestRepository>,
    /// Parking policy (validity window).
    policy: ParkingConfig,
    /// Fire-and-forget notification hooks.
    notifier: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for GuestPassService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuestPassService").finish()
    }
}

impl GuestPassService {
    /// Creates a new guest pass service.
    pub fn new(
        pass_repo: Arc<GuestPassRepository>,
        slot_repo: Arc<SlotRepository>,
        request_repo: Arc<RequestRepository>,
        policy: ParkingConfig,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            pass_repo,
            slot_repo,
            request_repo,
            policy,
            notifier,
        }
    }

    /// Issue a pass for a guest vehicle.
    ///
    /// Rejects registered vehicles and vehicles that already hold a
    /// valid pass before any write. Allocation re-reads the store and
    /// claims the chosen slot inside the pass insert's transaction; if
    /// a concurrent writer takes the slot first, the next candidate is
    /// tried until the pool is exhausted, which fails with a capacity
    /// error.
    pub async fn issue(
        &self,
        vehicle_number: &str,
        vehicle_type: VehicleType,
        contact_phone: &str,
        contact_email: Option<&str>,
    ) -> AppResult<GuestPass> {
        if vehicle_number.trim().is_empty() {
            return Err(AppError::validation("Vehicle number cannot be empty"));
        }
        if contact_phone.trim().is_empty() {
            return Err(AppError::validation("Contact phone cannot be empty"));
        }

        if self.request_repo.is_vehicle_registered(vehicle_number).await? {
            return Err(AppError::conflict(format!(
                "Vehicle '{vehicle_number}' is registered; guest passes are for visitors"
            )));
        }

        let now = now_millis();
        if self
            .pass_repo
            .find_active_by_vehicle(vehicle_number, now)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Vehicle '{vehicle_number}' already holds an active guest pass"
            )));
        }

        loop {
            let slot = self
                .slot_repo
                .find_first_available(vehicle_type, None)
                .await?
                .ok_or_else(|| {
                    AppError::capacity(format!("No available slot for {vehicle_type}"))
                })?;

            let issue_time = now_millis();
            let data = CreateGuestPass {
                vehicle_number: vehicle_number.to_string(),
                vehicle_type,
                slot_id: slot.id,
                issue_time,
                expiry_time: issue_time + self.policy.pass_validity_hours * 3_600_000,
                contact_phone: contact_phone.to_string(),
                contact_email: contact_email.unwrap_or_default().to_string(),
                pass_code: self.generate_pass_code().await?,
            };

            match self.pass_repo.create(&data).await {
                Ok(pass) => {
                    info!(
                        pass_id = %pass.id,
                        slot_id = %pass.slot_id,
                        vehicle = %pass.vehicle_number,
                        "Guest pass issued"
                    );
                    self.notifier.guest_pass_issued(&pass);
                    return Ok(pass);
                }
                // Lost the slot to a concurrent writer; re-read and retry.
                Err(e) if e.is(ErrorKind::Capacity) => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Deactivate a pass and release its slot. Repeating the call is a
    /// safe no-op: the pass stays inactive and the slot stays available.
    pub async fn deactivate(&self, id: PassId) -> AppResult<()> {
        let pass = self
            .pass_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest pass {id} not found")))?;

        self.pass_repo.deactivate(&pass).await?;

        info!(pass_id = %id, slot_id = %pass.slot_id, "Guest pass deactivated, slot released");
        Ok(())
    }

    /// Active, unexpired pass for a vehicle number, or `None`.
    ///
    /// Expired-but-still-active passes are invisible here but are not
    /// deactivated; see the expiry sweep for explicit release.
    pub async fn find_active_by_vehicle(
        &self,
        vehicle_number: &str,
    ) -> AppResult<Option<GuestPass>> {
        self.pass_repo
            .find_active_by_vehicle(vehicle_number, now_millis())
            .await
    }

    /// All active, unexpired passes.
    pub async fn list_active(&self) -> AppResult<Vec<GuestPass>> {
        self.pass_repo.find_all_valid(now_millis()).await
    }

    /// Generate a pass code not currently in use.
    async fn generate_pass_code(&self) -> AppResult<String> {
        for _ in 0..PASS_CODE_ATTEMPTS {
            let code: String = {
                let mut rng = rand::thread_rng();
                (0..PASS_CODE_LEN)
                    .map(|_| PASS_CODE_ALPHABET[rng.gen_range(0..PASS_CODE_ALPHABET.len())] as char)
                    .collect()
            };

            if !self.pass_repo.code_exists(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Exhausted attempts to generate a unique pass code",
        ))
    }
}
