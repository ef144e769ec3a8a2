//! Vehicle classification and lookup result types.

pub mod details;

pub use details::VehicleDetails;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two vehicle classes the campus inventory distinguishes.
///
/// The wire/storage form uses the hyphenated strings `"2-wheeler"` and
/// `"4-wheeler"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum VehicleType {
    /// Motorcycles and scooters.
    #[serde(rename = "2-wheeler")]
    #[sqlx(rename = "2-wheeler")]
    TwoWheeler,
    /// Cars and vans.
    #[serde(rename = "4-wheeler")]
    #[sqlx(rename = "4-wheeler")]
    FourWheeler,
}

impl VehicleType {
    /// Return the storage form of the vehicle type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoWheeler => "2-wheeler",
            Self::FourWheeler => "4-wheeler",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = parkhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2-wheeler" => Ok(Self::TwoWheeler),
            "4-wheeler" => Ok(Self::FourWheeler),
            _ => Err(parkhub_core::AppError::validation(format!(
                "Invalid vehicle type: '{s}'. Expected '2-wheeler' or '4-wheeler'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "2-wheeler".parse::<VehicleType>().unwrap(),
            VehicleType::TwoWheeler
        );
        assert!("3-wheeler".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_serde_form() {
        let json = serde_json::to_string(&VehicleType::FourWheeler).unwrap();
        assert_eq!(json, "\"4-wheeler\"");
    }
}
