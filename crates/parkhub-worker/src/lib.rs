//! Background sweeps for ParkHub.
//!
//! This crate provides:
//! - The overstay sweep that force-completes bookings past the maximum
//!   duration, releases their slots, and records violations
//! - A start/stop-safe recurring runner driving a sweep on an interval
//! - An opt-in sweep that releases slots held by expired guest passes

pub mod pass_expiry;
pub mod runner;
pub mod sweeper;

pub use runner::SweeperHandle;
pub use sweeper::{OverstaySweep, SweepReport};
