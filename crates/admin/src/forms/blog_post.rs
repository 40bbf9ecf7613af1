//! Blog post form.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use cafe_ancestral_core::{BlogPost, ImageSource};

use super::{FormError, checkbox, datetime, datetime_local, image, required};

/// Submitted blog post form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlogPostForm {
    pub title: String,
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    pub image_url: String,
    /// Blank publishes with the submission time.
    pub published_at: String,
    pub is_published: Option<String>,
}

/// A validated post ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPostInput {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: ImageSource,
    pub published_at: DateTime<Utc>,
    pub is_published: bool,
}

impl BlogPostForm {
    /// Validate the submission, dating an undated post at `now`.
    ///
    /// # Errors
    ///
    /// Returns `FormError` for blank fields or an unreadable date.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<BlogPostInput, FormError> {
        let published_at = if self.published_at.trim().is_empty() {
            now
        } else {
            datetime(&self.published_at, "fecha de publicación")?
        };

        Ok(BlogPostInput {
            title: required(&self.title, "título")?,
            excerpt: required(&self.excerpt, "extracto")?,
            content: required(&self.content, "contenido")?,
            image: image(&self.image_url),
            published_at,
            is_published: checkbox(self.is_published.as_deref()),
        })
    }
}

impl From<&BlogPost> for BlogPostForm {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            image_url: post.image.url().unwrap_or_default().to_owned(),
            published_at: datetime_local(&post.published_at),
            is_published: post.is_published.then(|| "on".to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_undated_post_uses_now() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let form = BlogPostForm {
            title: "Origen del grano".to_owned(),
            excerpt: "De Chiapas a tu taza.".to_owned(),
            content: "## Chiapas\n\nAltura y sombra.".to_owned(),
            ..BlogPostForm::default()
        };

        let input = form.validate(now).unwrap();
        assert_eq!(input.published_at, now);
        assert!(!input.is_published);
        assert!(input.image.is_missing());
    }

    #[test]
    fn test_content_is_required() {
        let form = BlogPostForm {
            title: "Borrador".to_owned(),
            excerpt: "Pronto".to_owned(),
            ..BlogPostForm::default()
        };
        assert!(matches!(
            form.validate(Utc::now()),
            Err(FormError::Required("contenido"))
        ));
    }
}
