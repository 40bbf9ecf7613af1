//! Blog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use cafe_ancestral_core::{BlogPost, BlogPostId};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::markdown;
use crate::state::AppState;

/// Number of recent posts to show in sidebar.
const RECENT_POSTS_COUNT: usize = 3;

/// Post view for templates.
#[derive(Clone)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub image_url: String,
    pub published_on: String,
}

impl From<&BlogPost> for PostView {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            image_url: post.image.display_url().to_string(),
            published_on: filters::long_date(&post.published_at),
        }
    }
}

/// Blog index page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub posts: Vec<PostView>,
}

/// Blog post detail template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub post: PostView,
    pub content_html: String,
    pub recent_posts: Vec<PostView>,
}

/// Display the blog index page with all published posts.
///
/// # Errors
///
/// Returns an error if posts cannot be loaded.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<BlogIndexTemplate> {
    let posts = CatalogRepository::new(state.pool())
        .published_posts(None)
        .await?;

    Ok(BlogIndexTemplate {
        posts: posts.iter().map(PostView::from).collect(),
    })
}

/// Display a single blog post by ID.
///
/// # Errors
///
/// Returns 404 if the ID is malformed, the post doesn't exist, or it is a draft.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BlogShowTemplate> {
    let not_found = || AppError::NotFound(format!("blog post {id}"));
    let post_id: BlogPostId = id.parse().map_err(|_| not_found())?;

    let catalog = CatalogRepository::new(state.pool());
    let post = catalog
        .published_post(post_id)
        .await?
        .ok_or_else(not_found)?;

    // One extra so the sidebar still has three after dropping this post
    let limit = i64::try_from(RECENT_POSTS_COUNT + 1).unwrap_or(i64::MAX);
    let recent_posts = catalog
        .published_posts(Some(limit))
        .await?
        .iter()
        .filter(|p| p.id != post.id)
        .take(RECENT_POSTS_COUNT)
        .map(PostView::from)
        .collect();

    Ok(BlogShowTemplate {
        post: PostView::from(&post),
        content_html: markdown::render(&post.content),
        recent_posts,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cafe_ancestral_core::ImageSource;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn post() -> BlogPost {
        BlogPost {
            id: BlogPostId::new(Uuid::from_u128(5)),
            title: "El arte del Cold Brew".to_string(),
            excerpt: "Dieciocho horas de paciencia.".to_string(),
            content: "## Preparación\n\nMacerado en **frío**.".to_string(),
            image: ImageSource::Missing,
            published_at: Utc.with_ymd_and_hms(2024, 11, 2, 9, 0, 0).unwrap(),
            is_published: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_post_view() {
        let view = PostView::from(&post());
        assert_eq!(view.published_on, "2 de noviembre de 2024");
        assert_eq!(view.id, Uuid::from_u128(5).to_string());
    }

    #[test]
    fn test_show_template_renders_markdown_body() {
        let post = post();
        let html = BlogShowTemplate {
            post: PostView::from(&post),
            content_html: markdown::render(&post.content),
            recent_posts: Vec::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains("<h2>Preparación</h2>"));
        assert!(html.contains("<strong>frío</strong>"));
    }
}
