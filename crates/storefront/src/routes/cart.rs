//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself is stored in the session. Each request rebuilds a
//! [`CartStore`] from it, applies one operation, and a subscriber marks the
//! session copy stale so the changed cart is written back.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use cafe_ancestral_core::{Cart, CartLineItem, CartProduct, CartStore, OrderHandoff, ProductId};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub quantity: u64,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image_url: item.image_url.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_price: item.subtotal().to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub total: String,
    pub item_count: u64,
    /// Pre-filled WhatsApp link for the current cart.
    pub order_url: String,
}

impl CartView {
    /// Build the view for `cart`, including its order link.
    #[must_use]
    pub fn new(cart: &Cart, handoff: &OrderHandoff) -> Self {
        let total = cart.total().to_string();
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: total.clone(),
            total,
            item_count: cart.item_count(),
            order_url: handoff.url(cart),
        }
    }

    /// Whether there is nothing to order.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the shopper's cart from the session, empty if there is none.
async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Apply one store operation to the session cart.
///
/// The cart is written back only when a subscriber saw a change.
async fn apply<F>(session: &Session, operation: F) -> Result<Cart>
where
    F: FnOnce(&mut CartStore),
{
    let mut store = CartStore::from_cart(load_cart(session).await?);

    let changed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&changed);
    store.subscribe(move |event, cart| {
        tracing::debug!(?event, lines = cart.items().len(), "Cart changed");
        flag.store(true, Ordering::Relaxed);
    });

    operation(&mut store);
    let cart = store.into_cart();

    if changed.load(Ordering::Relaxed) {
        session.insert(session_keys::CART, &cart).await?;
    }

    Ok(cart)
}

/// Parse a product ID submitted by a form.
fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid product id: {raw}")))
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update cart form data.
///
/// Any integer is accepted; zero or less removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Display cart page.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    Ok(CartShowTemplate {
        cart: CartView::new(&cart, state.handoff()),
    })
}

/// Add item to cart (HTMX).
///
/// Name, price and image are taken from the catalog, never from the form.
/// Returns the count badge with an HTMX trigger so other cart widgets refresh.
///
/// # Errors
///
/// Returns 404 for an unknown product and 400 for one that is unavailable.
#[instrument(skip(state, session), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;

    let product = CatalogRepository::new(state.pool())
        .product(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    if !product.is_available {
        return Err(AppError::BadRequest(format!(
            "{} is not available",
            product.name
        )));
    }

    add_breadcrumb("cart", "Added item", Some(&[("product", product.name.as_str())]));

    let line = CartProduct::from(&product);
    let cart = apply(&session, |store| store.add_item(line)).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Update cart item quantity (HTMX).
///
/// # Errors
///
/// Returns 400 if the product ID is malformed.
#[instrument(skip(state, session), fields(product_id = %form.product_id))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let cart = apply(&session, |store| store.update_quantity(id, form.quantity)).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::new(&cart, state.handoff()),
        },
    )
        .into_response())
}

/// Remove item from cart (HTMX).
///
/// # Errors
///
/// Returns 400 if the product ID is malformed.
#[instrument(skip(state, session), fields(product_id = %form.product_id))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let cart = apply(&session, |store| store.remove_item(id)).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::new(&cart, state.handoff()),
        },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

/// Redirect to the WhatsApp order handoff.
///
/// An empty cart goes back to the cart page instead.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let cart = load_cart(&session).await?;

    if cart.is_empty() {
        return Ok(Redirect::to("/cart"));
    }

    let count = cart.item_count().to_string();
    add_breadcrumb("cart", "Order handed off", Some(&[("items", count.as_str())]));
    tracing::info!(items = cart.item_count(), total = %cart.total(), "Order handed off to WhatsApp");

    Ok(Redirect::to(&state.handoff().url(&cart)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cafe_ancestral_core::{MerchantPhone, Price};
    use uuid::Uuid;

    fn espresso() -> CartProduct {
        CartProduct {
            id: ProductId::new(Uuid::from_u128(1)),
            name: "Espresso Doble".to_string(),
            price: Price::from_units(45),
            image_url: "https://example.com/espresso.jpg".to_string(),
        }
    }

    fn handoff() -> OrderHandoff {
        OrderHandoff::new(MerchantPhone::parse("521234567890").unwrap())
    }

    #[test]
    fn test_cart_view_formats_prices() {
        let mut store = CartStore::new();
        store.add_item(espresso());
        store.add_item(espresso());

        let view = CartView::new(store.cart(), &handoff());
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].price, "$45");
        assert_eq!(view.items[0].line_price, "$90");
        assert_eq!(view.total, "$90");
        assert_eq!(view.subtotal, view.total);
        assert_eq!(view.item_count, 2);
        assert!(view.order_url.starts_with("https://wa.me/521234567890?text="));
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::new(&Cart::new(), &handoff());
        assert!(view.is_empty());
        assert_eq!(view.total, "$0");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_parse_product_id() {
        let id = ProductId::new(Uuid::from_u128(7));
        assert_eq!(parse_product_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_product_id("espresso"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_cart_templates_render() {
        let mut store = CartStore::new();
        store.add_item(espresso());
        let cart = CartView::new(store.cart(), &handoff());

        let html = CartItemsTemplate { cart: cart.clone() }.render().unwrap();
        assert!(html.contains("Espresso Doble"));
        assert!(html.contains("$45"));

        let badge = CartCountTemplate { count: 3 }.render().unwrap();
        assert!(badge.contains('3'));

        let page = CartShowTemplate { cart }.render().unwrap();
        assert!(page.contains("Tu Pedido"));
        assert!(page.contains("ORDENAR POR WHATSAPP"));
    }

    #[test]
    fn test_empty_cart_page_invites_browsing() {
        let page = CartShowTemplate {
            cart: CartView::new(&Cart::new(), &handoff()),
        }
        .render()
        .unwrap();
        assert!(page.contains("Tu carrito está esperando por algo delicioso."));
        assert!(page.contains("EXPLORAR MENÚ"));
    }
}
