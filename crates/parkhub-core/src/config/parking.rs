//! Parking policy configuration.

use serde::{Deserialize, Serialize};

/// Policy knobs for the allocation and booking engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingConfig {
    /// Maximum permitted parking duration in minutes. Bookings whose
    /// recorded stay exceeds this are force-completed by the sweeper.
    #[serde(default = "default_max_duration")]
    pub max_duration_minutes: i64,
    /// Penalty charged for an overstay violation.
    #[serde(default = "default_penalty")]
    pub overstay_penalty: f64,
    /// Guest pass validity window in hours.
    #[serde(default = "default_pass_validity")]
    pub pass_validity_hours: i64,
    /// When false, penalty debits clamp the user's balance at zero
    /// instead of letting it go negative.
    #[serde(default = "default_true")]
    pub allow_negative_balance: bool,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            max_duration_minutes: default_max_duration(),
            overstay_penalty: default_penalty(),
            pass_validity_hours: default_pass_validity(),
            allow_negative_balance: true,
        }
    }
}

fn default_max_duration() -> i64 {
    720
}

fn default_penalty() -> f64 {
    500.0
}

fn default_pass_validity() -> i64 {
    24
}

fn default_true() -> bool {
    true
}
