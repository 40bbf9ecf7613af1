//! Product management routes.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tracing::instrument;

use cafe_ancestral_core::{Category, Product, ProductId};

use crate::db::{CategoryRepository, ProductRepository, RepositoryError};
use crate::error::Result;
use crate::forms::ProductForm;
use crate::middleware::auth::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::{AdminUserView, SelectOption, category_options, parse_id, rejection, render};

const PATH: &str = "/products";

/// Product row for the list page.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
    pub is_available: bool,
}

impl ProductView {
    fn new(product: &Product, categories: &[Category]) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: categories
                .iter()
                .find(|c| c.id == product.category_id)
                .map_or_else(|| "—".to_string(), |c| c.name.clone()),
            price: product.price.to_string(),
            image_url: product.image.display_url().to_string(),
            is_available: product.is_available,
        }
    }
}

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub products: Vec<ProductView>,
}

/// Product create/edit form template.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub action: String,
    pub is_new: bool,
    pub form: ProductForm,
    pub categories: Vec<SelectOption>,
    pub error: Option<String>,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/new", get(new_product))
        .route("/{id}", post(update))
        .route("/{id}/edit", get(edit))
        .route("/{id}/delete", post(delete))
}

/// Render the form, loading the category choices.
async fn form_page(
    admin: &CurrentAdmin,
    state: &AppState,
    id: Option<ProductId>,
    form: ProductForm,
    error: Option<String>,
) -> Result<Html<String>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;

    Ok(render(&ProductFormTemplate {
        admin_user: AdminUserView::from(admin),
        current_path: PATH.to_string(),
        action: id.map_or_else(|| PATH.to_string(), |id| format!("{PATH}/{id}")),
        is_new: id.is_none(),
        categories: category_options(&categories, &form.category_id),
        form,
        error,
    }))
}

/// Products list page handler.
#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let pool = state.pool();
    let product_repo = ProductRepository::new(pool);
    let category_repo = CategoryRepository::new(pool);
    let (products, categories) = tokio::try_join!(product_repo.list(), category_repo.list())?;

    Ok(render(&ProductsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: PATH.to_string(),
        products: products
            .iter()
            .map(|p| ProductView::new(p, &categories))
            .collect(),
    }))
}

/// New product form handler.
#[instrument(skip(admin, state))]
async fn new_product(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let form = ProductForm {
        is_available: Some("on".to_owned()),
        ..ProductForm::default()
    };
    form_page(&admin, &state, None, form, None).await
}

/// Create product handler.
#[instrument(skip(admin, state, form), fields(name = %form.name))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return Ok(form_page(&admin, &state, None, form, Some(e.to_string()))
                .await?
                .into_response());
        }
    };

    match ProductRepository::new(state.pool()).create(&input).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "Product created");
            Ok(Redirect::to(PATH).into_response())
        }
        Err(e) => {
            let message = rejection(e)?;
            Ok(form_page(&admin, &state, None, form, Some(message))
                .await?
                .into_response())
        }
    }
}

/// Edit product form handler.
#[instrument(skip(admin, state))]
async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let id: ProductId = parse_id(&id)?;
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    form_page(&admin, &state, Some(id), ProductForm::from(&product), None).await
}

/// Update product handler.
#[instrument(skip(admin, state, form))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let id: ProductId = parse_id(&id)?;
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return Ok(form_page(&admin, &state, Some(id), form, Some(e.to_string()))
                .await?
                .into_response());
        }
    };

    match ProductRepository::new(state.pool()).update(id, &input).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "Product updated");
            Ok(Redirect::to(PATH).into_response())
        }
        Err(e) => {
            let message = rejection(e)?;
            Ok(form_page(&admin, &state, Some(id), form, Some(message))
                .await?
                .into_response())
        }
    }
}

/// Delete product handler.
#[instrument(skip(_admin, state))]
async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id: ProductId = parse_id(&id)?;
    let image_url = ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!(product_id = %id, "Product deleted");

    state.storage().remove_image(image_url.as_deref()).await;
    Ok(Redirect::to(PATH))
}
