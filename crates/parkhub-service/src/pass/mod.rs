//! Guest pass management.

pub mod service;

pub use service::GuestPassService;
