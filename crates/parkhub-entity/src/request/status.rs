//! Registration request status and document kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Review states of a registration request. Approved and rejected are
/// terminal; re-submission is not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting admin review.
    Pending,
    /// Accepted; the vehicle counts as registered.
    Approved,
    /// Declined.
    Rejected,
}

impl RequestStatus {
    /// Whether the status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Return the status as its storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = parkhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(parkhub_core::AppError::validation(format!(
                "Invalid request status: '{s}'"
            ))),
        }
    }
}

/// The three documents a registration request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Driver's license.
    License,
    /// Registration certificate book.
    Rc,
    /// College verification book.
    Cv,
}
