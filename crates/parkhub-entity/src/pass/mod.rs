//! Guest pass entity.

pub mod model;

pub use model::GuestPass;
