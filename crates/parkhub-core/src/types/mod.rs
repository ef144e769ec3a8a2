//! Shared primitive types: typed identifiers and time helpers.

pub mod id;
pub mod time;

pub use id::{BookingId, PassId, RequestId, SlotId, UserId, ViolationId};
