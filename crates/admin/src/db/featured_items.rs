//! Featured item repository.

use sqlx::PgPool;

use cafe_ancestral_core::rows::{FEATURED_COLUMNS, FeaturedItemRow, convert_all};
use cafe_ancestral_core::{FeaturedItem, FeaturedItemId};

use super::RepositoryError;
use crate::forms::FeaturedItemInput;

/// Repository for home page featured items.
pub struct FeaturedItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FeaturedItemRepository<'a> {
    /// Create a new featured item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All featured items in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list(&self) -> Result<Vec<FeaturedItem>, RepositoryError> {
        let rows: Vec<FeaturedItemRow> = sqlx::query_as(&format!(
            "SELECT {FEATURED_COLUMNS} FROM featured_items ORDER BY sort_order, created_at"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(convert_all(rows)?)
    }

    /// Get a featured item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get(&self, id: FeaturedItemId) -> Result<Option<FeaturedItem>, RepositoryError> {
        let row: Option<FeaturedItemRow> = sqlx::query_as(&format!(
            "SELECT {FEATURED_COLUMNS} FROM featured_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(FeaturedItem::try_from).transpose()?)
    }

    /// Create a featured item.
    ///
    /// Callers check the item limit with [`Self::count`] first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &FeaturedItemInput) -> Result<FeaturedItem, RepositoryError> {
        let row: FeaturedItemRow = sqlx::query_as(&format!(
            "INSERT INTO featured_items \
             (title, subtitle, description, image_url, link_kind, link_value, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {FEATURED_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(input.subtitle.as_deref())
        .bind(input.description.as_deref())
        .bind(input.image.url())
        .bind(input.link.kind().as_str())
        .bind(input.link.value())
        .bind(input.sort_order)
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await?;

        Ok(FeaturedItem::try_from(row)?)
    }

    /// Replace a featured item's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: FeaturedItemId,
        input: &FeaturedItemInput,
    ) -> Result<FeaturedItem, RepositoryError> {
        let row: Option<FeaturedItemRow> = sqlx::query_as(&format!(
            "UPDATE featured_items SET title = $2, subtitle = $3, description = $4, \
             image_url = $5, link_kind = $6, link_value = $7, sort_order = $8, is_active = $9 \
             WHERE id = $1 \
             RETURNING {FEATURED_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(input.subtitle.as_deref())
        .bind(input.description.as_deref())
        .bind(input.image.url())
        .bind(input.link.kind().as_str())
        .bind(input.link.value())
        .bind(input.sort_order)
        .bind(input.is_active)
        .fetch_optional(self.pool)
        .await?;

        Ok(FeaturedItem::try_from(row.ok_or(RepositoryError::NotFound)?)?)
    }

    /// Delete a featured item, returning its image URL for storage cleanup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    pub async fn delete(&self, id: FeaturedItemId) -> Result<Option<String>, RepositoryError> {
        let image_url: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM featured_items WHERE id = $1 RETURNING image_url")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        image_url.ok_or(RepositoryError::NotFound)
    }

    /// Number of featured items, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM featured_items")
            .fetch_one(self.pool)
            .await?)
    }
}
