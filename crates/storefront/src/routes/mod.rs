//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero carousel + featured items)
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Menu
//! GET  /menu                   - Full menu with running offers
//! GET  /menu?category=<slug>   - Menu filtered to one category ("all" = no filter)
//!
//! # Blog
//! GET  /blog                   - Published posts, newest first
//! GET  /blog/{id}              - Post detail with recent posts
//!
//! # Pages
//! GET  /about                  - About us
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! GET  /cart/checkout          - Redirect to the WhatsApp order handoff
//! ```

pub mod blog;
pub mod cart;
pub mod home;
pub mod menu;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the blog routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::index))
        .route("/{id}", get(blog::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/checkout", get(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Menu
        .route("/menu", get(menu::index))
        // Blog
        .nest("/blog", blog_routes())
        // Static pages
        .route("/about", get(pages::about))
        // Cart
        .nest("/cart", cart_routes())
}
