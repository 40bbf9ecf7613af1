//! Database access for the storefront.
//!
//! The storefront only reads. Content is written by the admin panel; both
//! binaries share one database.
//!
//! ## Tables read here
//!
//! - `categories`, `products`, `offers` - the menu
//! - `blog_posts` - published posts
//! - `featured_items`, `hero_banners` - home page
//! - `tower_sessions.session` - carts (through `tower-sessions`)
//!
//! # Migrations
//!
//! Migrations live in the workspace `migrations/` directory and run via:
//! ```bash
//! cargo run -p cafe-ancestral-cli -- migrate
//! ```

pub mod catalog;

use std::time::Duration;

use cafe_ancestral_core::rows::RecordError;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::CatalogRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl From<RecordError> for RepositoryError {
    fn from(err: RecordError) -> Self {
        Self::DataCorruption(err.to_string())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
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
