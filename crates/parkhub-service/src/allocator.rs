//! Slot allocation and inventory queries.

use std::sync::Arc;

use tracing::info;

use parkhub_core::error::AppError;
use parkhub_core::result::AppResult;
use parkhub_database::repositories::SlotRepository;
use parkhub_entity::slot::{CreateSlot, Slot, Zone};
use parkhub_entity::vehicle::VehicleType;

/// Finds allocatable slots and answers inventory queries.
///
/// Allocation reads are deterministic first-fit over storage order and
/// side-effect-free: claiming the returned slot is the booking/pass
/// writer's job, and happens as a conditional update in the same
/// transaction as the claiming row's insert. Every call re-reads the
/// store; no slot state is cached across operations.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    /// Slot repository.
    slot_repo: Arc<SlotRepository>,
}

impl SlotAllocator {
    /// Creates a new slot allocator.
    pub fn new(slot_repo: Arc<SlotRepository>) -> Self {
        Self { slot_repo }
    }

    /// First available, non-reserved slot matching the filters, or
    /// `None` when there is no capacity. `None` is not an error.
    pub async fn find_available(
        &self,
        vehicle_type: VehicleType,
        zone: Option<Zone>,
    ) -> AppResult<Option<Slot>> {
        self.slot_repo.find_first_available(vehicle_type, zone).await
    }

    /// All available, non-reserved slots matching the filters, in
    /// storage order.
    pub async fn list_available(
        &self,
        vehicle_type: VehicleType,
        zone: Option<Zone>,
    ) -> AppResult<Vec<Slot>> {
        self.slot_repo.find_available(vehicle_type, zone).await
    }

    /// The entire inventory.
    pub async fn list_all(&self) -> AppResult<Vec<Slot>> {
        self.slot_repo.find_all().await
    }

    /// Slots in one campus zone.
    pub async fn list_by_zone(&self, zone: Zone) -> AppResult<Vec<Slot>> {
        self.slot_repo.find_by_zone(zone).await
    }

    /// Reserved slots.
    pub async fn list_reserved(&self) -> AppResult<Vec<Slot>> {
        self.slot_repo.find_reserved().await
    }

    /// `(available, total)` counts for a vehicle type.
    pub async fn counts_by_type(&self, vehicle_type: VehicleType) -> AppResult<(u32, u32)> {
        self.slot_repo.counts_by_type(vehicle_type).await
    }

    /// Admin: add a slot to the inventory.
    pub async fn add_slot(&self, data: &CreateSlot) -> AppResult<Slot> {
        if data.slot_number.trim().is_empty() {
            return Err(AppError::validation("Slot number cannot be empty"));
        }

        let slot = self.slot_repo.create(data).await?;
        info!(slot_id = %slot.id, slot_number = %slot.slot_number, "Slot added");
        Ok(slot)
    }
}
