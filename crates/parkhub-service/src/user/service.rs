//! User account service — registration and login.

use std::sync::Arc;

use tracing::info;

use parkhub_core::error::AppError;
use parkhub_core::result::AppResult;
use parkhub_core::types::UserId;
use parkhub_database::repositories::UserRepository;
use parkhub_entity::user::{CreateUser, User};

/// Handles user registration and authentication.
///
/// Credentials are compared verbatim, matching the reference system;
/// authentication hardening is out of scope.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Register a new account.
    pub async fn register(&self, data: &CreateUser) -> AppResult<User> {
        if data.username.trim().is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        if data.password.is_empty() {
            return Err(AppError::validation("Password cannot be empty"));
        }

        if self.user_repo.exists(&data.username).await? {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        let user = self.user_repo.create(data).await?;
        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Authenticate by username and password. `None` means the
    /// credentials did not match.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        self.user_repo.find_by_credentials(username, password).await
    }

    /// Fetch a user by ID.
    pub async fn get(&self, id: UserId) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}
