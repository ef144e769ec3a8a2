//! Booking lifecycle management.

pub mod service;

pub use service::BookingService;
