//! Dashboard route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::{
    db::{
        BlogPostRepository, CategoryRepository, FeaturedItemRepository, HeroBannerRepository,
        OfferRepository, ProductRepository,
    },
    error::Result,
    middleware::auth::RequireAdminAuth,
    models::CurrentAdmin,
    state::AppState,
};

use super::render;

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.to_string(),
        }
    }
}

/// One dashboard tile.
#[derive(Debug, Clone)]
pub struct CountCard {
    pub label: &'static str,
    pub count: i64,
    pub href: &'static str,
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub cards: Vec<CountCard>,
}

/// Dashboard page handler.
///
/// # Errors
///
/// Returns an error if the counts cannot be read.
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let pool = state.pool();
    let category_repo = CategoryRepository::new(pool);
    let product_repo = ProductRepository::new(pool);
    let offer_repo = OfferRepository::new(pool);
    let post_repo = BlogPostRepository::new(pool);
    let featured_repo = FeaturedItemRepository::new(pool);
    let banner_repo = HeroBannerRepository::new(pool);

    let (categories, products, offers, posts, featured, banners) = tokio::try_join!(
        category_repo.count(),
        product_repo.count(),
        offer_repo.count(),
        post_repo.count(),
        featured_repo.count(),
        banner_repo.count(),
    )?;

    let cards = vec![
        CountCard {
            label: "Categorías",
            count: categories,
            href: "/categories",
        },
        CountCard {
            label: "Productos",
            count: products,
            href: "/products",
        },
        CountCard {
            label: "Ofertas",
            count: offers,
            href: "/offers",
        },
        CountCard {
            label: "Entradas del blog",
            count: posts,
            href: "/blog",
        },
        CountCard {
            label: "Destacados",
            count: featured,
            href: "/featured-items",
        },
        CountCard {
            label: "Banners",
            count: banners,
            href: "/hero-banners",
        },
    ];

    Ok(render(&DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/".to_string(),
        cards,
    }))
}
