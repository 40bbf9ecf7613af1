//! Product repository.

use sqlx::PgPool;

use cafe_ancestral_core::rows::{PRODUCT_COLUMNS, ProductRow, convert_all};
use cafe_ancestral_core::{Product, ProductId};

use super::{RepositoryError, write_error};
use crate::forms::ProductInput;

const UNKNOWN_CATEGORY: &str = "La categoría seleccionada no existe";

/// Repository for menu products.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(convert_all(rows)?)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::try_from).transpose()?)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            "INSERT INTO products \
             (category_id, name, description, price, image_url, ingredients, allergens, is_available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(input.image.url())
        .bind(input.ingredients.as_deref())
        .bind(input.allergens.as_deref())
        .bind(input.is_available)
        .fetch_one(self.pool)
        .await
        .map_err(write_error(UNKNOWN_CATEGORY))?;

        Ok(Product::try_from(row)?)
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the category doesn't exist.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE products SET category_id = $2, name = $3, description = $4, price = $5, \
             image_url = $6, ingredients = $7, allergens = $8, is_available = $9 \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(input.image.url())
        .bind(input.ingredients.as_deref())
        .bind(input.allergens.as_deref())
        .bind(input.is_available)
        .fetch_optional(self.pool)
        .await
        .map_err(write_error(UNKNOWN_CATEGORY))?;

        Ok(Product::try_from(row.ok_or(RepositoryError::NotFound)?)?)
    }

    /// Delete a product, returning its image URL for storage cleanup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn delete(&self, id: ProductId) -> Result<Option<String>, RepositoryError> {
        let image_url: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM products WHERE id = $1 RETURNING image_url")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        image_url.ok_or(RepositoryError::NotFound)
    }

    /// Number of products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?)
    }
}
