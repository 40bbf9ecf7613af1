//! Hero carousel banner management routes.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tracing::instrument;

use cafe_ancestral_core::{HeroBanner, HeroBannerId};

use crate::db::{HeroBannerRepository, RepositoryError};
use crate::error::Result;
use crate::forms::HeroBannerForm;
use crate::middleware::auth::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::{AdminUserView, LinkChoices, LinkSelection, parse_id, render};

const PATH: &str = "/hero-banners";

/// Button label for new banners.
const DEFAULT_CTA_TEXT: &str = "VER MENÚ";

#[derive(Debug, Clone)]
pub struct HeroBannerView {
    pub id: String,
    pub title: String,
    pub cta_text: String,
    pub image_url: String,
    pub sort_order: i32,
    pub is_active: bool,
}

impl From<&HeroBanner> for HeroBannerView {
    fn from(banner: &HeroBanner) -> Self {
        Self {
            id: banner.id.to_string(),
            title: banner.title.clone(),
            cta_text: banner.cta_text.clone(),
            image_url: banner.image.display_url().to_string(),
            sort_order: banner.sort_order,
            is_active: banner.is_active,
        }
    }
}

#[derive(Template)]
#[template(path = "hero_banners/index.html")]
pub struct HeroBannersIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub banners: Vec<HeroBannerView>,
}

#[derive(Template)]
#[template(path = "hero_banners/form.html")]
pub struct HeroBannerFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub action: String,
    pub is_new: bool,
    pub form: HeroBannerForm,
    pub links: LinkChoices,
    pub error: Option<String>,
}

/// Build the hero banners router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/new", get(new_banner))
        .route("/{id}", post(update))
        .route("/{id}/edit", get(edit))
        .route("/{id}/delete", post(delete))
}

async fn form_page(
    admin: &CurrentAdmin,
    state: &AppState,
    id: Option<HeroBannerId>,
    form: HeroBannerForm,
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

    Ok(render(&HeroBannerFormTemplate {
        admin_user: AdminUserView::from(admin),
        current_path: PATH.to_string(),
        action: id.map_or_else(|| PATH.to_string(), |id| format!("{PATH}/{id}")),
        is_new: id.is_none(),
        form,
        links,
        error,
    }))
}

#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let banners = HeroBannerRepository::new(state.pool()).list().await?;

    Ok(render(&HeroBannersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: PATH.to_string(),
        banners: banners.iter().map(HeroBannerView::from).collect(),
    }))
}

#[instrument(skip(admin, state))]
async fn new_banner(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let form = HeroBannerForm {
        cta_text: DEFAULT_CTA_TEXT.to_owned(),
        link_kind: "custom".to_owned(),
        link_url: "/menu".to_owned(),
        sort_order: "0".to_owned(),
        is_active: Some("on".to_owned()),
        ..HeroBannerForm::default()
    };
    form_page(&admin, &state, None, form, None).await
}

#[instrument(skip(admin, state, form), fields(title = %form.title))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<HeroBannerForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return Ok(form_page(&admin, &state, None, form, Some(e.to_string()))
                .await?
                .into_response());
        }
    };

    let banner = HeroBannerRepository::new(state.pool()).create(&input).await?;
    tracing::info!(banner_id = %banner.id, "Hero banner created");

    Ok(Redirect::to(PATH).into_response())
}

#[instrument(skip(admin, state))]
async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let id: HeroBannerId = parse_id(&id)?;
    let banner = HeroBannerRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    form_page(&admin, &state, Some(id), HeroBannerForm::from(&banner), None).await
}

#[instrument(skip(admin, state, form))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<HeroBannerForm>,
) -> Result<Response> {
    let id: HeroBannerId = parse_id(&id)?;
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return Ok(form_page(&admin, &state, Some(id), form, Some(e.to_string()))
                .await?
                .into_response());
        }
    };

    HeroBannerRepository::new(state.pool())
        .update(id, &input)
        .await?;
    tracing::info!(banner_id = %id, "Hero banner updated");

    Ok(Redirect::to(PATH).into_response())
}

#[instrument(skip(_admin, state))]
async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id: HeroBannerId = parse_id(&id)?;
    let image_url = HeroBannerRepository::new(state.pool()).delete(id).await?;
    tracing::info!(banner_id = %id, "Hero banner deleted");

    state.storage().remove_image(image_url.as_deref()).await;
    Ok(Redirect::to(PATH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cafe_ancestral_core::{AdminUserId, Email};
    use crate::routes::SelectOption;
    use uuid::Uuid;

    #[test]
    fn test_banner_form_renders_link_kinds() {
        let admin = CurrentAdmin {
            id: AdminUserId::new(Uuid::from_u128(1)),
            email: Email::parse("admin@cafeancestral.mx").unwrap(),
            name: "Admin".to_string(),
        };
        let mut links = LinkChoices::default();
        links.kinds.push(SelectOption {
            value: "custom".to_string(),
            label: "URL personalizada".to_string(),
            selected: true,
        });

        let html = HeroBannerFormTemplate {
            admin_user: AdminUserView::from(&admin),
            current_path: PATH.to_string(),
            action: PATH.to_string(),
            is_new: true,
            form: HeroBannerForm {
                cta_text: DEFAULT_CTA_TEXT.to_string(),
                link_kind: "custom".to_string(),
                ..HeroBannerForm::default()
            },
            links,
            error: None,
        }
        .render()
        .unwrap();

        assert!(html.contains("<option value=\"custom\" selected>URL personalizada</option>"));
        assert!(html.contains("value=\"VER MENÚ\""));
    }
}
