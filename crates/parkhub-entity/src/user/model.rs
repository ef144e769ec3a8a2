//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parkhub_core::types::UserId;

use super::role::UserRole;

/// A registered account in the parking system.
///
/// `salary` is a running balance debited by violation penalties; with the
/// default policy it may go negative.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Stored credential, compared verbatim on login.
    #[serde(skip_serializing)]
    pub password: String,
    /// Role controlling dashboard access.
    pub role: UserRole,
    /// Human-readable display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Running balance in currency units.
    pub salary: f64,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Login credential.
    pub password: String,
    /// Assigned role.
    pub role: UserRole,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Starting balance.
    pub salary: f64,
}
