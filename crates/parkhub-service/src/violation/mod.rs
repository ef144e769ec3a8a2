//! Violation ledger.

pub mod service;

pub use service::ViolationService;
