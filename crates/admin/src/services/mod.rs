//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Email and password authentication (argon2)
//! - `storage` - Object storage client for uploaded images

pub mod auth;
pub mod storage;

pub use auth::{AdminAuthError, AdminAuthService, hash_password};
pub use storage::{StorageClient, StorageError};
