//! # parkhub-service
//!
//! Business logic service layer for ParkHub. Each service orchestrates
//! repositories and policy configuration to implement application-level
//! use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod allocator;
pub mod booking;
pub mod lookup;
pub mod notification;
pub mod pass;
pub mod recognition;
pub mod registration;
pub mod user;
pub mod violation;

pub use allocator::SlotAllocator;
pub use booking::BookingService;
pub use lookup::VehicleLookup;
pub use notification::{LogNotifier, NotificationSink};
pub use pass::GuestPassService;
pub use recognition::{PlateRecognizer, SimulatedRecognizer};
pub use registration::RegistrationService;
pub use user::UserService;
pub use violation::ViolationService;
