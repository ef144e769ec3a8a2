//! # parkhub-entity
//!
//! Domain entity models for ParkHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod booking;
pub mod pass;
pub mod request;
pub mod slot;
pub mod user;
pub mod vehicle;
pub mod violation;
