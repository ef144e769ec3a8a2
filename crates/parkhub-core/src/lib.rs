//! # parkhub-core
//!
//! Core crate for ParkHub. Contains configuration schemas, typed
//! identifiers, epoch-millisecond time helpers, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other ParkHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
