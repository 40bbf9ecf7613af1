//! Blog post management routes.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::instrument;

use cafe_ancestral_core::{BlogPost, BlogPostId};

use crate::db::{BlogPostRepository, RepositoryError};
use crate::error::Result;
use crate::forms::{BlogPostForm, datetime_local};
use crate::middleware::auth::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::{AdminUserView, parse_id, render};

const PATH: &str = "/blog";

/// Post row for the list page.
#[derive(Debug, Clone)]
pub struct BlogPostView {
    pub id: String,
    pub title: String,
    pub published_at: String,
    pub is_published: bool,
}

impl From<&BlogPost> for BlogPostView {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            published_at: post.published_at.format("%Y-%m-%d %H:%M").to_string(),
            is_published: post.is_published,
        }
    }
}

/// Blog list page template.
#[derive(Template)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub posts: Vec<BlogPostView>,
}

/// Blog post create/edit form template.
#[derive(Template)]
#[template(path = "blog/form.html")]
pub struct BlogPostFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub action: String,
    pub is_new: bool,
    pub form: BlogPostForm,
    pub error: Option<String>,
}

impl BlogPostFormTemplate {
    fn page(
        admin: &CurrentAdmin,
        id: Option<BlogPostId>,
        form: BlogPostForm,
        error: Option<String>,
    ) -> Html<String> {
        render(&Self {
            admin_user: AdminUserView::from(admin),
            current_path: PATH.to_string(),
            action: id.map_or_else(|| PATH.to_string(), |id| format!("{PATH}/{id}")),
            is_new: id.is_none(),
            form,
            error,
        })
    }
}

/// Build the blog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/new", get(new_post))
        .route("/{id}", post(update))
        .route("/{id}/edit", get(edit))
        .route("/{id}/delete", post(delete))
}

/// Blog list page handler.
#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let posts = BlogPostRepository::new(state.pool()).list().await?;

    Ok(render(&BlogIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: PATH.to_string(),
        posts: posts.iter().map(BlogPostView::from).collect(),
    }))
}

/// New post form handler.
#[instrument(skip(admin))]
async fn new_post(RequireAdminAuth(admin): RequireAdminAuth) -> Html<String> {
    let form = BlogPostForm {
        published_at: datetime_local(&Utc::now()),
        ..BlogPostForm::default()
    };
    BlogPostFormTemplate::page(&admin, None, form, None)
}

/// Create post handler.
#[instrument(skip(admin, state, form), fields(title = %form.title))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<BlogPostForm>,
) -> Result<Response> {
    let input = match form.validate(Utc::now()) {
        Ok(input) => input,
        Err(e) => {
            return Ok(
                BlogPostFormTemplate::page(&admin, None, form, Some(e.to_string())).into_response(),
            );
        }
    };

    let post = BlogPostRepository::new(state.pool()).create(&input).await?;
    tracing::info!(post_id = %post.id, published = post.is_published, "Blog post created");

    Ok(Redirect::to(PATH).into_response())
}

/// Edit post form handler.
#[instrument(skip(admin, state))]
async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let id: BlogPostId = parse_id(&id)?;
    let post = BlogPostRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    Ok(BlogPostFormTemplate::page(
        &admin,
        Some(id),
        BlogPostForm::from(&post),
        None,
    ))
}

/// Update post handler.
#[instrument(skip(admin, state, form))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BlogPostForm>,
) -> Result<Response> {
    let id: BlogPostId = parse_id(&id)?;
    let input = match form.validate(Utc::now()) {
        Ok(input) => input,
        Err(e) => {
            return Ok(
                BlogPostFormTemplate::page(&admin, Some(id), form, Some(e.to_string()))
                    .into_response(),
            );
        }
    };

    BlogPostRepository::new(state.pool()).update(id, &input).await?;
    tracing::info!(post_id = %id, "Blog post updated");

    Ok(Redirect::to(PATH).into_response())
}

/// Delete post handler.
#[instrument(skip(_admin, state))]
async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id: BlogPostId = parse_id(&id)?;
    let image_url = BlogPostRepository::new(state.pool()).delete(id).await?;
    tracing::info!(post_id = %id, "Blog post deleted");

    state.storage().remove_image(image_url.as_deref()).await;
    Ok(Redirect::to(PATH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cafe_ancestral_core::{AdminUserId, Email};
    use uuid::Uuid;

    #[test]
    fn test_form_marks_draft_checkbox() {
        let admin = CurrentAdmin {
            id: AdminUserId::new(Uuid::from_u128(1)),
            email: Email::parse("admin@cafeancestral.mx").unwrap(),
            name: "Admin".to_string(),
        };
        let form = BlogPostForm {
            title: "Nuevo tueste".to_string(),
            content: "**Notas** de cacao".to_string(),
            is_published: Some("on".to_string()),
            ..BlogPostForm::default()
        };

        let Html(html) = BlogPostFormTemplate::page(&admin, None, form, None);
        assert!(html.contains("value=\"Nuevo tueste\""));
        assert!(html.contains("**Notas** de cacao"));
        assert!(html.contains("name=\"is_published\" checked"));
    }
}
