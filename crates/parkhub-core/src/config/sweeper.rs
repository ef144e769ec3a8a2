//! Overstay sweeper configuration.

use serde::{Deserialize, Serialize};

/// Background sweeper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Whether the sweeper is started by the server binary.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between sweep cycles. The first cycle runs immediately.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: default_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    15 * 60
}
