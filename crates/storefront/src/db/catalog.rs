//! Read-only catalog queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cafe_ancestral_core::rows::{
    BLOG_COLUMNS, BlogPostRow, CATEGORY_COLUMNS, CategoryRow, FEATURED_COLUMNS, FeaturedItemRow,
    HERO_COLUMNS, HeroBannerRow, OFFER_COLUMNS, OfferRow, PRODUCT_COLUMNS, ProductRow, convert_all,
};
use cafe_ancestral_core::{
    BlogPost, BlogPostId, Category, FeaturedItem, HeroBanner, MAX_FEATURED_ITEMS, Offer, Product,
    ProductId, Slug,
};

use super::RepositoryError;

/// Repository for everything the public site displays.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All categories in menu order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY sort_order, name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(convert_all(rows)?)
    }

    /// All products, newest first.
    ///
    /// Unavailable products are included; the menu marks them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(convert_all(rows)?)
    }

    /// Products of the category with `slug`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn products_in_category(&self, slug: &Slug) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {} FROM products p \
             JOIN categories c ON c.id = p.category_id \
             WHERE c.slug = $1 \
             ORDER BY p.created_at DESC",
            prefixed(PRODUCT_COLUMNS, "p")
        ))
        .bind(slug.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(convert_all(rows)?)
    }

    /// A single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::try_from).transpose()?)
    }

    /// Offers that are active and inside their date window at `now`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn running_offers(&self, now: DateTime<Utc>) -> Result<Vec<Offer>, RepositoryError> {
        let rows: Vec<OfferRow> = sqlx::query_as(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers \
             WHERE is_active AND start_date <= $1 AND end_date >= $1 \
             ORDER BY end_date"
        ))
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        let offers: Vec<Offer> = convert_all(rows)?;
        Ok(offers.into_iter().filter(|o| o.is_running(now)).collect())
    }

    /// Published posts, newest first, optionally limited.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn published_posts(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<BlogPost>, RepositoryError> {
        let rows: Vec<BlogPostRow> = sqlx::query_as(&format!(
            "SELECT {BLOG_COLUMNS} FROM blog_posts \
             WHERE is_published \
             ORDER BY published_at DESC \
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    /// A published post by ID. Drafts are treated as missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn published_post(&self, id: BlogPostId) -> Result<Option<BlogPost>, RepositoryError> {
        let row: Option<BlogPostRow> = sqlx::query_as(&format!(
            "SELECT {BLOG_COLUMNS} FROM blog_posts WHERE id = $1 AND is_published"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(BlogPost::from))
    }

    /// Active hero banners in carousel order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn active_hero_banners(&self) -> Result<Vec<HeroBanner>, RepositoryError> {
        let rows: Vec<HeroBannerRow> = sqlx::query_as(&format!(
            "SELECT {HERO_COLUMNS} FROM hero_banners \
             WHERE is_active \
             ORDER BY sort_order, created_at"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(convert_all(rows)?)
    }

    /// Up to three active featured items in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn active_featured_items(&self) -> Result<Vec<FeaturedItem>, RepositoryError> {
        let rows: Vec<FeaturedItemRow> = sqlx::query_as(&format!(
            "SELECT {FEATURED_COLUMNS} FROM featured_items \
             WHERE is_active \
             ORDER BY sort_order, created_at \
             LIMIT $1"
        ))
        .bind(i64::try_from(MAX_FEATURED_ITEMS).unwrap_or(3))
        .fetch_all(self.pool)
        .await?;

        Ok(convert_all(rows)?)
    }
}

/// Qualify a comma-separated column list with a table alias.
fn prefixed(columns: &str, alias: &str) -> String {
    columns
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_columns() {
        assert_eq!(prefixed("id, name,  slug", "c"), "c.id, c.name, c.slug");
    }

    #[test]
    fn test_product_columns_qualify_cleanly() {
        let qualified = prefixed(PRODUCT_COLUMNS, "p");
        assert!(qualified.starts_with("p.id, p.category_id"));
        assert!(qualified.ends_with("p.created_at"));
        assert!(!qualified.contains("p. "));
    }
}
