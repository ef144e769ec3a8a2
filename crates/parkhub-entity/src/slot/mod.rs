//! Parking slot entity.

pub mod model;
pub mod zone;

pub use model::{CreateSlot, Slot};
pub use zone::Zone;
