//! Fire-and-forget notification hooks.
//!
//! Delivery (SMS/email) is an external collaborator; the core only
//! invokes these hooks and never tracks confirmation.

use parkhub_entity::booking::Booking;
use parkhub_entity::pass::GuestPass;

/// Outbound notification seam.
///
/// Implementations must not block and must not fail the calling
/// operation; anything that can go wrong stays on the collaborator's
/// side of the seam.
pub trait NotificationSink: Send + Sync {
    /// A booking was created.
    fn booking_confirmed(&self, booking: &Booking);

    /// A guest pass was issued.
    fn guest_pass_issued(&self, pass: &GuestPass);
}

/// Default sink that logs the hook invocations.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn booking_confirmed(&self, booking: &Booking) {
        tracing::info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            "Notification: booking confirmed"
        );
    }

    fn guest_pass_issued(&self, pass: &GuestPass) {
        tracing::info!(
            pass_id = %pass.id,
            pass_code = %pass.pass_code,
            contact_phone = %pass.contact_phone,
            "Notification: guest pass issued"
        );
    }
}
