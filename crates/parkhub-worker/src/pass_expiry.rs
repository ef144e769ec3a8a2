//! Expired guest pass release sweep.
//!
//! Pass expiry is lazy by default: lookups treat an expired pass as
//! inactive but nothing releases its slot. This sweep makes the release
//! explicit for deployments that want it; it is not scheduled unless
//! the embedding application runs it.

use std::sync::Arc;

use tracing::{info, warn};

use parkhub_core::result::AppResult;
use parkhub_core::types::time::now_millis;
use parkhub_database::repositories::GuestPassRepository;

/// Deactivates expired-but-still-active passes and releases their slots.
#[derive(Debug, Clone)]
pub struct PassExpirySweep {
    /// Guest pass repository.
    pass_repo: Arc<GuestPassRepository>,
}

impl PassExpirySweep {
    /// Creates a new pass expiry sweep.
    pub fn new(pass_repo: Arc<GuestPassRepository>) -> Self {
        Self { pass_repo }
    }

    /// Run one cycle. Returns the number of passes released. One pass's
    /// failure never aborts the rest.
    pub async fn run_once(&self) -> AppResult<usize> {
        let expired = self.pass_repo.find_expired_active(now_millis()).await?;
        let mut released = 0;

        for pass in &expired {
            match self.pass_repo.deactivate(pass).await {
                Ok(()) => released += 1,
                Err(e) => {
                    warn!(
                        pass_id = %pass.id,
                        error = %e,
                        "Expired pass release failed; continuing"
                    );
                }
            }
        }

        if released > 0 {
            info!(released, "Released slots held by expired guest passes");
        }

        Ok(released)
    }
}
