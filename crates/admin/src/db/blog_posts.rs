//! Blog post repository.
//!
//! Unlike the storefront, the admin panel sees drafts too.

use sqlx::PgPool;

use cafe_ancestral_core::rows::{BLOG_COLUMNS, BlogPostRow};
use cafe_ancestral_core::{BlogPost, BlogPostId};

use super::RepositoryError;
use crate::forms::BlogPostInput;

/// Repository for blog posts.
pub struct BlogPostRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BlogPostRepository<'a> {
    /// Create a new blog post repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All posts, drafts included, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        let rows: Vec<BlogPostRow> = sqlx::query_as(&format!(
            "SELECT {BLOG_COLUMNS} FROM blog_posts ORDER BY published_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    /// Get a post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BlogPostId) -> Result<Option<BlogPost>, RepositoryError> {
        let row: Option<BlogPostRow> = sqlx::query_as(&format!(
            "SELECT {BLOG_COLUMNS} FROM blog_posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(BlogPost::from))
    }

    /// Create a post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &BlogPostInput) -> Result<BlogPost, RepositoryError> {
        let row: BlogPostRow = sqlx::query_as(&format!(
            "INSERT INTO blog_posts \
             (title, excerpt, content, image_url, published_at, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(input.image.url())
        .bind(input.published_at)
        .bind(input.is_published)
        .fetch_one(self.pool)
        .await?;

        Ok(BlogPost::from(row))
    }

    /// Replace a post's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: BlogPostId,
        input: &BlogPostInput,
    ) -> Result<BlogPost, RepositoryError> {
        let row: Option<BlogPostRow> = sqlx::query_as(&format!(
            "UPDATE blog_posts SET title = $2, excerpt = $3, content = $4, image_url = $5, \
             published_at = $6, is_published = $7 \
             WHERE id = $1 \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(input.image.url())
        .bind(input.published_at)
        .bind(input.is_published)
        .fetch_optional(self.pool)
        .await?;

        row.map(BlogPost::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete a post, returning its image URL for storage cleanup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist.
    pub async fn delete(&self, id: BlogPostId) -> Result<Option<String>, RepositoryError> {
        let image_url: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM blog_posts WHERE id = $1 RETURNING image_url")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        image_url.ok_or(RepositoryError::NotFound)
    }

    /// Number of posts, drafts included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts")
            .fetch_one(self.pool)
            .await?)
    }
}
