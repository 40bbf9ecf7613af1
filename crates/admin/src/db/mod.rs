//! Database operations for the admin panel.
//!
//! # Database
//!
//! The admin panel shares one `PostgreSQL` database with the storefront and
//! is the only writer of content.
//!
//! ## Tables
//!
//! - `admin_users` - Admin accounts (argon2 password hashes)
//! - `categories`, `products`, `offers` - The menu
//! - `blog_posts` - Blog posts (Markdown bodies)
//! - `featured_items`, `hero_banners` - Home page content
//! - `tower_sessions.session` - Admin sessions (through `tower-sessions`)
//!
//! # Migrations
//!
//! Migrations live in the workspace `migrations/` directory and run via:
//! ```bash
//! cargo run -p cafe-ancestral-cli -- migrate
//! ```

pub mod admin_users;
pub mod blog_posts;
pub mod categories;
pub mod featured_items;
pub mod hero_banners;
pub mod offers;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use cafe_ancestral_core::rows::RecordError;

pub use admin_users::AdminUserRepository;
pub use blog_posts::BlogPostRepository;
pub use categories::CategoryRepository;
pub use featured_items::FeaturedItemRepository;
pub use hero_banners::HeroBannerRepository;
pub use offers::OfferRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate slug, category still in use).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl From<RecordError> for RepositoryError {
    fn from(err: RecordError) -> Self {
        Self::DataCorruption(err.to_string())
    }
}

/// Map a failed write, turning constraint violations into `Conflict`.
///
/// `message` is shown to the admin, so it is written for them.
pub(crate) fn write_error(message: &str) -> impl FnOnce(sqlx::Error) -> RepositoryError + '_ {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e
            && (db_err.is_unique_violation() || db_err.is_foreign_key_violation())
        {
            return RepositoryError::Conflict(message.to_owned());
        }
        RepositoryError::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_errors_pass_through() {
        let err = write_error("El slug ya existe")(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_record_error_is_corruption() {
        let err = RepositoryError::from(RecordError::Slug(
            cafe_ancestral_core::SlugError::Empty("!".to_owned()),
        ));
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
