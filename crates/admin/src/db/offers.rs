//! Offer repository.

use sqlx::PgPool;

use cafe_ancestral_core::rows::{OFFER_COLUMNS, OfferRow, convert_all};
use cafe_ancestral_core::{Offer, OfferId};

use super::RepositoryError;
use crate::forms::OfferInput;

/// Repository for menu offers.
pub struct OfferRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OfferRepository<'a> {
    /// Create a new offer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All offers, latest start first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list(&self) -> Result<Vec<Offer>, RepositoryError> {
        let rows: Vec<OfferRow> = sqlx::query_as(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers ORDER BY start_date DESC, created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(convert_all(rows)?)
    }

    /// Get an offer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get(&self, id: OfferId) -> Result<Option<Offer>, RepositoryError> {
        let row: Option<OfferRow> =
            sqlx::query_as(&format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Offer::try_from).transpose()?)
    }

    /// Create an offer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &OfferInput) -> Result<Offer, RepositoryError> {
        let row: OfferRow = sqlx::query_as(&format!(
            "INSERT INTO offers \
             (title, description, price, image_url, is_active, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {OFFER_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(input.image.url())
        .bind(input.is_active)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_one(self.pool)
        .await?;

        Ok(Offer::try_from(row)?)
    }

    /// Replace an offer's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the offer doesn't exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(&self, id: OfferId, input: &OfferInput) -> Result<Offer, RepositoryError> {
        let row: Option<OfferRow> = sqlx::query_as(&format!(
            "UPDATE offers SET title = $2, description = $3, price = $4, image_url = $5, \
             is_active = $6, start_date = $7, end_date = $8 \
             WHERE id = $1 \
             RETURNING {OFFER_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(input.image.url())
        .bind(input.is_active)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_optional(self.pool)
        .await?;

        Ok(Offer::try_from(row.ok_or(RepositoryError::NotFound)?)?)
    }

    /// Delete an offer, returning its image URL for storage cleanup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the offer doesn't exist.
    pub async fn delete(&self, id: OfferId) -> Result<Option<String>, RepositoryError> {
        let image_url: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM offers WHERE id = $1 RETURNING image_url")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        image_url.ok_or(RepositoryError::NotFound)
    }

    /// Number of offers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM offers")
            .fetch_one(self.pool)
            .await?)
    }
}
