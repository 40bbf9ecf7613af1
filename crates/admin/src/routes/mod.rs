//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Dashboard
//! GET  /                       - Record counts
//!
//! # Auth (email + password)
//! GET  /auth/login             - Login page
//! POST /auth/login             - Check credentials, start session
//! POST /auth/logout            - Logout
//!
//! # Content (same shape for every record type)
//! GET  /categories             - List
//! GET  /categories/new         - Create form
//! POST /categories             - Create
//! GET  /categories/{id}/edit   - Edit form
//! POST /categories/{id}        - Update
//! POST /categories/{id}/delete - Delete
//!
//! ... /products, /offers, /blog, /featured-items, /hero-banners
//!
//! # Uploads
//! POST /uploads                - Multipart `file` -> JSON `{ "url": ... }`
//! ```

pub mod auth;
pub mod blog_posts;
pub mod categories;
pub mod dashboard;
pub mod featured_items;
pub mod hero_banners;
pub mod offers;
pub mod products;
pub mod uploads;

use std::str::FromStr;

use askama::Template;
use axum::{Router, response::Html, routing::get};

use cafe_ancestral_core::{BlogPost, Category, Product};

use crate::db::{BlogPostRepository, CategoryRepository, ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::state::AppState;

pub use dashboard::AdminUserView;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .merge(auth::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/offers", offers::router())
        .nest("/blog", blog_posts::router())
        .nest("/featured-items", featured_items::router())
        .nest("/hero-banners", hero_banners::router())
        .merge(uploads::router())
}

/// Render a template, logging failures instead of propagating them.
pub(crate) fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Parse a record ID from the path; a malformed one is simply not found.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("record {raw}")))
}

/// Turn a constraint violation into a message for the form; anything else
/// is a server error.
pub(crate) fn rejection(err: RepositoryError) -> Result<String> {
    match err {
        RepositoryError::Conflict(message) => Ok(message),
        other => Err(other.into()),
    }
}

/// One `<option>` of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: String, label: String, current: &str) -> Self {
        let selected = value == current;
        Self {
            value,
            label,
            selected,
        }
    }
}

pub(crate) fn category_options(categories: &[Category], current: &str) -> Vec<SelectOption> {
    categories
        .iter()
        .map(|c| SelectOption::new(c.id.to_string(), c.name.clone(), current))
        .collect()
}

fn product_options(products: &[Product], current: &str) -> Vec<SelectOption> {
    products
        .iter()
        .map(|p| SelectOption::new(p.id.to_string(), p.name.clone(), current))
        .collect()
}

fn post_options(posts: &[BlogPost], current: &str) -> Vec<SelectOption> {
    posts
        .iter()
        .map(|p| SelectOption::new(p.id.to_string(), p.title.clone(), current))
        .collect()
}

/// Choices for the link picker on featured item and hero banner forms.
#[derive(Debug, Clone, Default)]
pub struct LinkChoices {
    pub kinds: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub products: Vec<SelectOption>,
    pub posts: Vec<SelectOption>,
}

/// Current values of the link picker.
pub(crate) struct LinkSelection<'a> {
    pub kind: &'a str,
    pub category: &'a str,
    pub product: &'a str,
    pub blog: &'a str,
}

impl LinkChoices {
    /// Load every linkable record, marking the selected ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read.
    pub(crate) async fn load(state: &AppState, selection: &LinkSelection<'_>) -> Result<Self> {
        let pool = state.pool();
        let category_repo = CategoryRepository::new(pool);
        let product_repo = ProductRepository::new(pool);
        let post_repo = BlogPostRepository::new(pool);
        let (categories, products, posts) = tokio::try_join!(
            category_repo.list(),
            product_repo.list(),
            post_repo.list(),
        )?;

        Ok(Self::build(&categories, &products, &posts, selection))
    }

    fn build(
        categories: &[Category],
        products: &[Product],
        posts: &[BlogPost],
        selection: &LinkSelection<'_>,
    ) -> Self {
        let kinds = cafe_ancestral_core::LinkKind::ALL
            .iter()
            .map(|kind| {
                SelectOption::new(
                    kind.as_str().to_owned(),
                    kind.label().to_owned(),
                    selection.kind,
                )
            })
            .collect();

        Self {
            kinds,
            categories: category_options(categories, selection.category),
            products: product_options(products, selection.product),
            posts: post_options(posts, selection.blog),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cafe_ancestral_core::{CategoryId, CategoryKind, Slug};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_parse_id_rejects_garbage_as_not_found() {
        let id: CategoryId = parse_id(&Uuid::from_u128(4).to_string()).unwrap();
        assert_eq!(id, CategoryId::new(Uuid::from_u128(4)));
        assert!(matches!(
            parse_id::<CategoryId>("42"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_rejection_only_passes_conflicts() {
        assert_eq!(
            rejection(RepositoryError::Conflict("duplicado".to_owned())).unwrap(),
            "duplicado"
        );
        assert!(rejection(RepositoryError::NotFound).is_err());
    }

    #[test]
    fn test_link_choices_mark_selection() {
        let category = Category {
            id: CategoryId::new(Uuid::from_u128(2)),
            name: "Bebidas".to_owned(),
            slug: Slug::from_name("Bebidas").unwrap(),
            kind: CategoryKind::Drink,
            sort_order: 0,
            created_at: Utc::now(),
        };
        let current = category.id.to_string();
        let choices = LinkChoices::build(
            std::slice::from_ref(&category),
            &[],
            &[],
            &LinkSelection {
                kind: "category",
                category: &current,
                product: "",
                blog: "",
            },
        );

        assert_eq!(choices.kinds.len(), 4);
        assert!(choices.kinds.iter().any(|k| k.value == "category" && k.selected));
        assert!(choices.categories.first().unwrap().selected);
        assert!(choices.products.is_empty());
    }
}
