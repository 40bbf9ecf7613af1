//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! ca-cli admin create -e admin@cafeancestral.mx -n "Admin" -p "a long password"
//! ```

use cafe_ancestral_admin::services::{AdminAuthError, AdminAuthService};
use cafe_ancestral_core::{AdminUserId, Email};
use thiserror::Error;

use super::{CommandError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// User already exists.
    #[error("Admin user already exists with email: {0}")]
    UserExists(String),

    #[error(transparent)]
    Auth(AdminAuthError),
}

/// Create a new admin user.
///
/// Returns the ID of the created admin user.
///
/// # Errors
///
/// Returns `AdminError` for a malformed email, a short password, a taken
/// email or a database failure.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<AdminUserId, AdminError> {
    let email = Email::parse(email).map_err(|_| AdminError::InvalidEmail(email.to_owned()))?;
    let pool = connect().await?;

    tracing::info!("Creating admin user: {}", email);

    let user = AdminAuthService::new(&pool)
        .register(&email, name.trim(), password)
        .await
        .map_err(|e| match e {
            AdminAuthError::UserAlreadyExists => AdminError::UserExists(email.to_string()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );

    Ok(user.id)
}
