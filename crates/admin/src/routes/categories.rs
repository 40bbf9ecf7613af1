//! Category management routes.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tracing::instrument;

use cafe_ancestral_core::{Category, CategoryId, CategoryKind};

use crate::db::{CategoryRepository, RepositoryError};
use crate::error::Result;
use crate::forms::CategoryForm;
use crate::middleware::auth::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::{AdminUserView, SelectOption, parse_id, rejection, render};

const PATH: &str = "/categories";

/// Category row for the list page.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub kind: &'static str,
    pub sort_order: i32,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            slug: category.slug.to_string(),
            kind: category.kind.label(),
            sort_order: category.sort_order,
        }
    }
}

/// Categories list page template.
#[derive(Template)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub categories: Vec<CategoryView>,
    pub error: Option<String>,
}

/// Category create/edit form template.
#[derive(Template)]
#[template(path = "categories/form.html")]
pub struct CategoryFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub action: String,
    pub is_new: bool,
    pub form: CategoryForm,
    pub kinds: Vec<SelectOption>,
    pub error: Option<String>,
}

impl CategoryFormTemplate {
    fn new(admin: &CurrentAdmin, id: Option<CategoryId>, form: CategoryForm) -> Self {
        let kinds = [CategoryKind::Food, CategoryKind::Drink]
            .iter()
            .map(|kind| SelectOption {
                value: kind.as_str().to_owned(),
                label: kind.label().to_owned(),
                selected: form.kind == kind.as_str(),
            })
            .collect();

        Self {
            admin_user: AdminUserView::from(admin),
            current_path: PATH.to_string(),
            action: id.map_or_else(|| PATH.to_string(), |id| format!("{PATH}/{id}")),
            is_new: id.is_none(),
            form,
            kinds,
            error: None,
        }
    }

    fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/new", get(new_category))
        .route("/{id}", post(update))
        .route("/{id}/edit", get(edit))
        .route("/{id}/delete", post(delete))
}

async fn index_page(
    admin: &CurrentAdmin,
    state: &AppState,
    error: Option<String>,
) -> Result<Html<String>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;

    Ok(render(&CategoriesIndexTemplate {
        admin_user: AdminUserView::from(admin),
        current_path: PATH.to_string(),
        categories: categories.iter().map(CategoryView::from).collect(),
        error,
    }))
}

/// Categories list page handler.
#[instrument(skip(admin, state))]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    index_page(&admin, &state, None).await
}

/// New category form handler.
#[instrument(skip(admin))]
async fn new_category(RequireAdminAuth(admin): RequireAdminAuth) -> Html<String> {
    let form = CategoryForm {
        kind: CategoryKind::Food.as_str().to_owned(),
        ..CategoryForm::default()
    };
    render(&CategoryFormTemplate::new(&admin, None, form))
}

/// Create category handler.
#[instrument(skip(admin, state, form), fields(name = %form.name))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let page = CategoryFormTemplate::new(&admin, None, form).with_error(e.to_string());
            return Ok(render(&page).into_response());
        }
    };

    match CategoryRepository::new(state.pool()).create(&input).await {
        Ok(category) => {
            tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
            Ok(Redirect::to(PATH).into_response())
        }
        Err(e) => {
            let page = CategoryFormTemplate::new(&admin, None, form).with_error(rejection(e)?);
            Ok(render(&page).into_response())
        }
    }
}

/// Edit category form handler.
#[instrument(skip(admin, state))]
async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let id: CategoryId = parse_id(&id)?;
    let category = CategoryRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    Ok(render(&CategoryFormTemplate::new(
        &admin,
        Some(id),
        CategoryForm::from(&category),
    )))
}

/// Update category handler.
#[instrument(skip(admin, state, form))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CategoryForm>,
) -> Result<Response> {
    let id: CategoryId = parse_id(&id)?;
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let page = CategoryFormTemplate::new(&admin, Some(id), form).with_error(e.to_string());
            return Ok(render(&page).into_response());
        }
    };

    match CategoryRepository::new(state.pool()).update(id, &input).await {
        Ok(category) => {
            tracing::info!(category_id = %category.id, "Category updated");
            Ok(Redirect::to(PATH).into_response())
        }
        Err(e) => {
            let page = CategoryFormTemplate::new(&admin, Some(id), form).with_error(rejection(e)?);
            Ok(render(&page).into_response())
        }
    }
}

/// Delete category handler.
///
/// A category that still has products is kept and the list shows why.
#[instrument(skip(admin, state))]
async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id: CategoryId = parse_id(&id)?;

    match CategoryRepository::new(state.pool()).delete(id).await {
        Ok(()) => {
            tracing::info!(category_id = %id, "Category deleted");
            Ok(Redirect::to(PATH).into_response())
        }
        Err(e) => {
            let message = rejection(e)?;
            Ok(index_page(&admin, &state, Some(message))
                .await?
                .into_response())
        }
    }
}
