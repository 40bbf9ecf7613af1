//! Featured item management routes.
//!
//! At most [`MAX_FEATURED_ITEMS`] rows may exist. The limit is checked on
//! create against the stored count; edits never change the count.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tracing::instrument;

use cafe_ancestral_core::{FeaturedItem, FeaturedItemId, MAX_FEATURED_ITEMS};

use crate::db::{FeaturedItemRepository, RepositoryError};
use crate::error::Result;
use crate::forms::{FeaturedItemForm, FormError};
use crate::middleware::auth::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::{AdminUserView, LinkChoices, LinkSelection, parse_id, render};

const PATH: &str = "/featured-items";

/// Featured item row for the list page.
#[derive(Debug, Clone)]
pub struct FeaturedItemView {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub link: String,
    pub sort_order: i32,
    pub is_active: bool,
}

impl From<&FeaturedItem> for FeaturedItemView {
    fn from(item: &FeaturedItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            image_url: item.image.display_url().to_string(),
            link: format!("{}: {}", item.link.kind().label(), item.link.value()),
            sort_order: item.sort_order,
            is_active: item.is_active,
        }
    }
}

/// Featured items list page template.
#[derive(Template)]
#[template(path = "featured_items/index.html")]
pub struct FeaturedItemsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub items: Vec<FeaturedItemView>,
    pub can_create: bool,
    pub max_items: usize,
}

/// Featured item create/edit form template.
#[derive(Template)]
#[template(path = "featured_items/form.html")]
pub struct FeaturedItemFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub action: String,
    pub is_new: bool,
    pub form: FeaturedItemForm,
    pub links: LinkChoices,
    pub error: Option<String>,
}

/// Build the featured items router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/new", get(new_item))
        .route("/{id}", post(update))
        .route("/{id}/edit", get(edit))
        .route("/{id}/delete", post(delete))
}

/// Whether `count` stored items leave no room for another.
fn is_full(count: i64) -> bool {
    !usize::try_from(count).is_ok_and(|count| count < MAX_FEATURED_ITEMS)
}

/// Render the form, loading the link picker choices.
async fn form_page(
    admin: &CurrentAdmin,
    state: &AppState,
    id: Option<FeaturedItemId>,
    form: FeaturedItemForm,
    error: Option<String>,
) -> Result<Html<String>> {
    let links = LinkChoices::load(
        state,
        &LinkSelection {
            kind: &form.link_kind,
            category: &form.link_category,
            product: &form.link_product,
            blog: &form.link_blog,
        },
    )
    .await?;

    Ok(render(&FeaturedItemFormTemplate {
        admin_user: AdminUserView::from(admin),
        current_path: PATH.to_string(),
        action: id.map_or_else(|| PATH.to_string(), |id| format!("{PATH}/{id}")),
        is_new: id.is_none(),
        form,
        links,
        error,
    }))
}

/// Featured items list page handler.
#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let items = FeaturedItemRepository::new(state.pool()).list().await?;
    let count = i64::try_from(items.len()).unwrap_or(i64::MAX);

    Ok(render(&FeaturedItemsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: PATH.to_string(),
        items: items.iter().map(FeaturedItemView::from).collect(),
        can_create: !is_full(count),
        max_items: MAX_FEATURED_ITEMS,
    }))
}

/// New featured item form handler.
#[instrument(skip(admin, state))]
async fn new_item(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let form = FeaturedItemForm {
        link_kind: "custom".to_owned(),
        sort_order: "0".to_owned(),
        is_active: Some("on".to_owned()),
        ..FeaturedItemForm::default()
    };
    form_page(&admin, &state, None, form, None).await
}

/// Create featured item handler.
#[instrument(skip(admin, state, form), fields(title = %form.title))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<FeaturedItemForm>,
) -> Result<Response> {
    let repo = FeaturedItemRepository::new(state.pool());

    if is_full(repo.count().await?) {
        tracing::warn!("Featured item limit reached");
        let error = FormError::TooManyFeatured.to_string();
        return Ok(form_page(&admin, &state, None, form, Some(error))
            .await?
            .into_response());
    }

    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return Ok(form_page(&admin, &state, None, form, Some(e.to_string()))
                .await?
                .into_response());
        }
    };

    let item = repo.create(&input).await?;
    tracing::info!(item_id = %item.id, "Featured item created");

    Ok(Redirect::to(PATH).into_response())
}

/// Edit featured item form handler.
#[instrument(skip(admin, state))]
async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let id: FeaturedItemId = parse_id(&id)?;
    let item = FeaturedItemRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    form_page(&admin, &state, Some(id), FeaturedItemForm::from(&item), None).await
}

/// Update featured item handler.
#[instrument(skip(admin, state, form))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<FeaturedItemForm>,
) -> Result<Response> {
    let id: FeaturedItemId = parse_id(&id)?;
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return Ok(form_page(&admin, &state, Some(id), form, Some(e.to_string()))
                .await?
                .into_response());
        }
    };

    FeaturedItemRepository::new(state.pool())
        .update(id, &input)
        .await?;
    tracing::info!(item_id = %id, "Featured item updated");

    Ok(Redirect::to(PATH).into_response())
}

/// Delete featured item handler.
#[instrument(skip(_admin, state))]
async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id: FeaturedItemId = parse_id(&id)?;
    let image_url = FeaturedItemRepository::new(state.pool()).delete(id).await?;
    tracing::info!(item_id = %id, "Featured item deleted");

    state.storage().remove_image(image_url.as_deref()).await;
    Ok(Redirect::to(PATH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cafe_ancestral_core::{AdminUserId, Email, ImageSource, LinkTarget};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_limit_is_three() {
        assert!(!is_full(0));
        assert!(!is_full(2));
        assert!(is_full(3));
        assert!(is_full(7));
        assert!(is_full(-1));
    }

    #[test]
    fn test_view_describes_link() {
        let item = FeaturedItem {
            id: FeaturedItemId::new(Uuid::from_u128(1)),
            title: "Nuestro pan".to_string(),
            subtitle: None,
            description: None,
            image: ImageSource::Missing,
            link: LinkTarget::Custom("/menu?category=panaderia".to_string()),
            sort_order: 1,
            is_active: true,
            created_at: Utc::now(),
        };

        let view = FeaturedItemView::from(&item);
        assert_eq!(view.link, "URL personalizada: /menu?category=panaderia");
        assert_eq!(view.image_url, cafe_ancestral_core::PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_form_keeps_custom_url_and_limit_error() {
        let admin = CurrentAdmin {
            id: AdminUserId::new(Uuid::from_u128(1)),
            email: Email::parse("admin@cafeancestral.mx").unwrap(),
            name: "Admin".to_string(),
        };
        let template = FeaturedItemFormTemplate {
            admin_user: AdminUserView::from(&admin),
            current_path: PATH.to_string(),
            action: PATH.to_string(),
            is_new: true,
            form: FeaturedItemForm {
                title: "Temporada".to_string(),
                link_kind: "custom".to_string(),
                link_url: "https://cafeancestral.mx/temporada".to_string(),
                ..FeaturedItemForm::default()
            },
            links: LinkChoices::default(),
            error: Some(FormError::TooManyFeatured.to_string()),
        };

        let html = template.render().unwrap();
        assert!(html.contains("value=\"https://cafeancestral.mx/temporada\""));
        assert!(html.contains("Solo se permiten 3 elementos destacados"));
    }
}
