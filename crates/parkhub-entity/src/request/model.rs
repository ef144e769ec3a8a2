//! Registration request entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parkhub_core::types::{RequestId, UserId};

use super::status::RequestStatus;
use crate::vehicle::VehicleType;

/// A registration application binding a user to a vehicle number, with
/// uploaded document paths and per-document verification flags.
///
/// Document paths are opaque strings; the core never interprets their
/// content.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParkingRequest {
    /// Unique request identifier.
    pub id: RequestId,
    /// The applying user.
    pub user_id: UserId,
    /// Vehicle number plate, as supplied or recognized.
    pub vehicle_number: String,
    /// Vehicle class being registered.
    pub vehicle_type: VehicleType,
    /// Path of the uploaded college verification book.
    pub cv_book_path: String,
    /// Path of the uploaded registration certificate book.
    pub rc_book_path: String,
    /// Path of the uploaded driver's license.
    pub driver_license_path: String,
    /// Declared helmet possession (2-wheelers).
    pub has_helmet: bool,
    /// Declared seat belt usage (4-wheelers).
    pub has_seat_belt: bool,
    /// Review state.
    pub status: RequestStatus,
    /// Submission timestamp (epoch ms).
    pub request_date: i64,
    /// Security verified the driver's license.
    pub license_verified: bool,
    /// Security verified the RC book.
    pub rc_verified: bool,
    /// Security verified the CV book.
    pub cv_verified: bool,
}

impl ParkingRequest {
    /// Whether every attached document has been verified.
    pub fn all_documents_verified(&self) -> bool {
        self.license_verified && self.rc_verified && self.cv_verified
    }
}

/// Data required to submit a new registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    /// The applying user.
    pub user_id: UserId,
    /// Vehicle number plate.
    pub vehicle_number: String,
    /// Vehicle class being registered.
    pub vehicle_type: VehicleType,
    /// Path of the uploaded CV book.
    pub cv_book_path: String,
    /// Path of the uploaded RC book.
    pub rc_book_path: String,
    /// Path of the uploaded driver's license.
    pub driver_license_path: String,
    /// Declared helmet possession.
    pub has_helmet: bool,
    /// Declared seat belt usage.
    pub has_seat_belt: bool,
}
