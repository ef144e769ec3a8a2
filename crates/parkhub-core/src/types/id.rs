//! Newtype wrappers around `i64` for all domain entity identifiers.
//!
//! Every collection in the store is keyed by an auto-incrementing integer
//! ID. Using distinct types prevents accidentally passing a `UserId`
//! where a `SlotId` is expected. The `#[sqlx(transparent)]` derive makes
//! each wrapper bind and decode as a plain integer column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an identifier from a raw row ID.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Return the inner integer value.
            pub fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user.
    UserId
);

define_id!(
    /// Unique identifier for a parking slot.
    SlotId
);

define_id!(
    /// Unique identifier for a booking.
    BookingId
);

define_id!(
    /// Unique identifier for a registration request.
    RequestId
);

define_id!(
    /// Unique identifier for a violation.
    ViolationId
);

define_id!(
    /// Unique identifier for a guest pass.
    PassId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_display() {
        let id = SlotId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_id_from_str() {
        let id: BookingId = "7".parse().expect("should parse");
        assert_eq!(id, BookingId::new(7));
        assert!("seven".parse::<BookingId>().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = UserId::new(3);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "3");
        let parsed: UserId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
