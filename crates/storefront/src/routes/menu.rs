//! Menu route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use cafe_ancestral_core::{Category, Offer, Product, Slug};

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Query value meaning "no category filter".
const ALL_CATEGORIES: &str = "all";

/// Menu query parameters.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

impl MenuQuery {
    /// The category slug to filter by, if any.
    ///
    /// A missing, blank or `all` value shows every product.
    #[must_use]
    pub fn category_filter(&self) -> Option<Slug> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
            .and_then(|c| Slug::parse(c).ok())
    }
}

/// Category tab for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub name: String,
    pub slug: String,
    pub kind: &'static str,
    pub selected: bool,
}

impl CategoryView {
    fn new(category: &Category, selected: Option<&Slug>) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.to_string(),
            kind: category.kind.label(),
            selected: selected == Some(&category.slug),
        }
    }
}

/// Product card for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub category_name: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub is_available: bool,
}

impl ProductView {
    fn new(product: &Product, categories: &[Category]) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image_url: product.image.display_url().to_string(),
            category_name: categories
                .iter()
                .find(|c| c.id == product.category_id)
                .map(|c| c.name.clone()),
            ingredients: product.ingredients.clone(),
            allergens: product.allergens.clone(),
            is_available: product.is_available,
        }
    }
}

/// Offer card for templates.
#[derive(Clone)]
pub struct OfferView {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub ends: String,
}

impl From<&Offer> for OfferView {
    fn from(offer: &Offer) -> Self {
        Self {
            title: offer.title.clone(),
            description: offer.description.clone(),
            price: offer.price.to_string(),
            image_url: offer.image.display_url().to_string(),
            ends: filters::long_date(&offer.end_date),
        }
    }
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub categories: Vec<CategoryView>,
    pub offers: Vec<OfferView>,
    pub products: Vec<ProductView>,
    /// True when no category filter is applied.
    pub showing_all: bool,
}

/// Display the menu, optionally filtered to one category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<MenuTemplate> {
    let catalog = CatalogRepository::new(state.pool());
    let filter = query.category_filter();

    let products = async {
        match &filter {
            Some(slug) => catalog.products_in_category(slug).await,
            None => catalog.products().await,
        }
    };
    let (categories, offers, products) = tokio::try_join!(
        catalog.categories(),
        catalog.running_offers(Utc::now()),
        products
    )?;

    Ok(MenuTemplate {
        categories: categories
            .iter()
            .map(|c| CategoryView::new(c, filter.as_ref()))
            .collect(),
        offers: offers.iter().map(OfferView::from).collect(),
        products: products
            .iter()
            .map(|p| ProductView::new(p, &categories))
            .collect(),
        showing_all: filter.is_none(),
    })
}
