//! Repository implementations for all ParkHub entities.

pub mod booking;
pub mod guest_pass;
pub mod request;
pub mod slot;
pub mod user;
pub mod violation;

pub use booking::BookingRepository;
pub use guest_pass::GuestPassRepository;
pub use request::RequestRepository;
pub use slot::SlotRepository;
pub use user::UserRepository;
pub use violation::ViolationRepository;
