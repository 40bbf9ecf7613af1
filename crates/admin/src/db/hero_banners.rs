//! Hero banner repository.

use sqlx::PgPool;

use cafe_ancestral_core::rows::{HERO_COLUMNS, HeroBannerRow, convert_all};
use cafe_ancestral_core::{HeroBanner, HeroBannerId};

use super::RepositoryError;
use crate::forms::HeroBannerInput;

/// Repository for home page hero banners.
pub struct HeroBannerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HeroBannerRepository<'a> {
    /// Create a new hero banner repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All hero banners in carousel order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list(&self) -> Result<Vec<HeroBanner>, RepositoryError> {
        let rows: Vec<HeroBannerRow> = sqlx::query_as(&format!(
            "SELECT {HERO_COLUMNS} FROM hero_banners ORDER BY sort_order, created_at"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(convert_all(rows)?)
    }

    /// Get a hero banner by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get(&self, id: HeroBannerId) -> Result<Option<HeroBanner>, RepositoryError> {
        let row: Option<HeroBannerRow> = sqlx::query_as(&format!(
            "SELECT {HERO_COLUMNS} FROM hero_banners WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(HeroBanner::try_from).transpose()?)
    }

    /// Create a hero banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &HeroBannerInput) -> Result<HeroBanner, RepositoryError> {
        let row: HeroBannerRow = sqlx::query_as(&format!(
            "INSERT INTO hero_banners \
             (title, subtitle, description, image_url, cta_text, link_kind, link_value, \
              sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {HERO_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(input.subtitle.as_deref())
        .bind(input.description.as_deref())
        .bind(input.image.url())
        .bind(&input.cta_text)
        .bind(input.link.kind().as_str())
        .bind(input.link.value())
        .bind(input.sort_order)
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await?;

        Ok(HeroBanner::try_from(row)?)
    }

    /// Replace a hero banner's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the banner doesn't exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: HeroBannerId,
        input: &HeroBannerInput,
    ) -> Result<HeroBanner, RepositoryError> {
        let row: Option<HeroBannerRow> = sqlx::query_as(&format!(
            "UPDATE hero_banners SET title = $2, subtitle = $3, description = $4, \
             image_url = $5, cta_text = $6, link_kind = $7, link_value = $8, sort_order = $9, \
             is_active = $10 \
             WHERE id = $1 \
             RETURNING {HERO_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(input.subtitle.as_deref())
        .bind(input.description.as_deref())
        .bind(input.image.url())
        .bind(&input.cta_text)
        .bind(input.link.kind().as_str())
        .bind(input.link.value())
        .bind(input.sort_order)
        .bind(input.is_active)
        .fetch_optional(self.pool)
        .await?;

        Ok(HeroBanner::try_from(row.ok_or(RepositoryError::NotFound)?)?)
    }

    /// Delete a hero banner, returning its image URL for storage cleanup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the banner doesn't exist.
    pub async fn delete(&self, id: HeroBannerId) -> Result<Option<String>, RepositoryError> {
        let image_url: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM hero_banners WHERE id = $1 RETURNING image_url")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        image_url.ok_or(RepositoryError::NotFound)
    }

    /// Number of hero banners, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM hero_banners")
            .fetch_one(self.pool)
            .await?)
    }
}
