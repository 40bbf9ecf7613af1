//! Offer management routes.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::{DateTime, Duration, Utc};
use tracing::instrument;

use cafe_ancestral_core::{Offer, OfferId};

use crate::db::{OfferRepository, RepositoryError};
use crate::error::Result;
use crate::forms::{OfferForm, datetime_local};
use crate::middleware::auth::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::{AdminUserView, parse_id, render};

const PATH: &str = "/offers";

/// Days a new offer runs unless changed.
const DEFAULT_OFFER_DAYS: i64 = 7;

/// Offer row for the list page.
#[derive(Debug, Clone)]
pub struct OfferView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub image_url: String,
    pub window: String,
    pub status: &'static str,
}

impl OfferView {
    fn new(offer: &Offer, now: DateTime<Utc>) -> Self {
        let status = if offer.is_running(now) {
            "Vigente"
        } else if !offer.is_active {
            "Inactiva"
        } else if now < offer.start_date {
            "Programada"
        } else {
            "Vencida"
        };

        Self {
            id: offer.id.to_string(),
            title: offer.title.clone(),
            price: offer.price.to_string(),
            image_url: offer.image.display_url().to_string(),
            window: format!(
                "{} → {}",
                offer.start_date.format("%Y-%m-%d"),
                offer.end_date.format("%Y-%m-%d")
            ),
            status,
        }
    }
}

/// Offers list page template.
#[derive(Template)]
#[template(path = "offers/index.html")]
pub struct OffersIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub offers: Vec<OfferView>,
}

/// Offer create/edit form template.
#[derive(Template)]
#[template(path = "offers/form.html")]
pub struct OfferFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub action: String,
    pub is_new: bool,
    pub form: OfferForm,
    pub error: Option<String>,
}

impl OfferFormTemplate {
    fn page(
        admin: &CurrentAdmin,
        id: Option<OfferId>,
        form: OfferForm,
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

/// Build the offers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/new", get(new_offer))
        .route("/{id}", post(update))
        .route("/{id}/edit", get(edit))
        .route("/{id}/delete", post(delete))
}

/// A blank offer starting now and running for a week.
fn blank_form(now: DateTime<Utc>) -> OfferForm {
    OfferForm {
        is_active: Some("on".to_owned()),
        start_date: datetime_local(&now),
        end_date: datetime_local(&(now + Duration::days(DEFAULT_OFFER_DAYS))),
        ..OfferForm::default()
    }
}

/// Offers list page handler.
#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let offers = OfferRepository::new(state.pool()).list().await?;
    let now = Utc::now();

    Ok(render(&OffersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: PATH.to_string(),
        offers: offers.iter().map(|o| OfferView::new(o, now)).collect(),
    }))
}

/// New offer form handler.
#[instrument(skip(admin))]
async fn new_offer(RequireAdminAuth(admin): RequireAdminAuth) -> Html<String> {
    OfferFormTemplate::page(&admin, None, blank_form(Utc::now()), None)
}

/// Create offer handler.
#[instrument(skip(admin, state, form), fields(title = %form.title))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<OfferForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return Ok(OfferFormTemplate::page(&admin, None, form, Some(e.to_string())).into_response());
        }
    };

    let offer = OfferRepository::new(state.pool()).create(&input).await?;
    tracing::info!(offer_id = %offer.id, "Offer created");

    Ok(Redirect::to(PATH).into_response())
}

/// Edit offer form handler.
#[instrument(skip(admin, state))]
async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let id: OfferId = parse_id(&id)?;
    let offer = OfferRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    Ok(OfferFormTemplate::page(&admin, Some(id), OfferForm::from(&offer), None))
}

/// Update offer handler.
#[instrument(skip(admin, state, form))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<OfferForm>,
) -> Result<Response> {
    let id: OfferId = parse_id(&id)?;
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return Ok(
                OfferFormTemplate::page(&admin, Some(id), form, Some(e.to_string())).into_response(),
            );
        }
    };

    OfferRepository::new(state.pool()).update(id, &input).await?;
    tracing::info!(offer_id = %id, "Offer updated");

    Ok(Redirect::to(PATH).into_response())
}

/// Delete offer handler.
#[instrument(skip(_admin, state))]
async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id: OfferId = parse_id(&id)?;
    let image_url = OfferRepository::new(state.pool()).delete(id).await?;
    tracing::info!(offer_id = %id, "Offer deleted");

    state.storage().remove_image(image_url.as_deref()).await;
    Ok(Redirect::to(PATH))
}
