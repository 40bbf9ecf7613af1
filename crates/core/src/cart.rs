//! Shopper cart and the store that mutates it.
//!
//! A [`Cart`] is plain data: an ordered list of line items, one per product,
//! serializable so it can live in a session. A [`CartStore`] owns one cart
//! for the duration of a request (or any other unit of work), applies the
//! four shopper operations and notifies its subscribers synchronously after
//! every change.
//!
//! There is no global store. Whoever needs a cart constructs a store from
//! the cart they loaded and hands it back with [`CartStore::into_cart`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::records::Product;
use crate::types::{Price, ProductId};

// =============================================================================
// Cart data
// =============================================================================

/// The fields of a catalog product the cart needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image.display_url().to_owned(),
        }
    }
}

/// One distinct product in the cart.
///
/// `quantity` is at least 1 for as long as the line is in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
    pub quantity: u64,
}

impl CartLineItem {
    /// `price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A shopper's selection, in first-added order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price * quantity` over every line.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    /// Number of units across all lines (the header badge).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |acc, item| acc.saturating_add(item.quantity))
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

// =============================================================================
// Events and subscriptions
// =============================================================================

/// What changed in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// A product entered the cart with quantity 1.
    ItemAdded { id: ProductId },
    /// An existing line's quantity changed.
    QuantityChanged { id: ProductId, quantity: u64 },
    /// A line left the cart.
    ItemRemoved { id: ProductId },
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&CartEvent, &Cart) + Send + Sync>;

// =============================================================================
// Store
// =============================================================================

/// Owns one cart and applies shopper operations to it.
///
/// Every operation is total: unknown ids are no-ops and nothing fails.
/// Subscribers run synchronously, in subscription order, after the cart has
/// changed. Operations that change nothing notify nobody.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// A store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store resuming a previously saved cart.
    #[must_use]
    pub fn from_cart(cart: Cart) -> Self {
        Self {
            cart,
            ..Self::default()
        }
    }

    /// Current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Give the cart back, dropping all subscribers.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    /// Register a listener called after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartEvent, &Cart) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Add one unit of `product`.
    ///
    /// A product not yet in the cart is appended with quantity 1; otherwise
    /// its quantity goes up by one.
    pub fn add_item(&mut self, product: CartProduct) {
        let event = match self.cart.position(product.id) {
            Some(index) => {
                let Some(item) = self.cart.items.get_mut(index) else {
                    return;
                };
                item.quantity = item.quantity.saturating_add(1);
                CartEvent::QuantityChanged {
                    id: item.id,
                    quantity: item.quantity,
                }
            }
            None => {
                let id = product.id;
                self.cart.items.push(CartLineItem {
                    id,
                    name: product.name,
                    price: product.price,
                    image_url: product.image_url,
                    quantity: 1,
                });
                CartEvent::ItemAdded { id }
            }
        };
        self.notify(&event);
    }

    /// Drop the line for `id`. Absent ids are ignored.
    pub fn remove_item(&mut self, id: ProductId) {
        if let Some(index) = self.cart.position(id) {
            self.cart.items.remove(index);
            self.notify(&CartEvent::ItemRemoved { id });
        }
    }

    /// Set the quantity for `id`.
    ///
    /// Any quantity of zero or below removes the line. Absent ids are
    /// ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        let quantity = quantity.unsigned_abs();

        let Some(item) = self.cart.items.iter_mut().find(|item| item.id == id) else {
            return;
        };
        if item.quantity == quantity {
            return;
        }
        item.quantity = quantity;
        self.notify(&CartEvent::QuantityChanged { id, quantity });
    }

    /// Sum of `price * quantity` over every line.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    fn notify(&self, event: &CartEvent) {
        tracing::trace!(?event, listeners = self.listeners.len(), "cart changed");
        for (_, listener) in &self.listeners {
            listener(event, &self.cart);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use uuid::Uuid;

    fn product(n: u128, name: &str, price: u32) -> CartProduct {
        CartProduct {
            id: ProductId::new(Uuid::from_u128(n)),
            name: name.to_owned(),
            price: Price::from_units(price),
            image_url: format!("https://cdn.example/{n}.jpg"),
        }
    }

    fn espresso() -> CartProduct {
        product(1, "Espresso Doble", 45)
    }

    fn pizza() -> CartProduct {
        product(2, "Pizza Margarita", 180)
    }

    fn quantities(store: &CartStore) -> Vec<u64> {
        store.cart().items().iter().map(|i| i.quantity).collect()
    }

    #[test]
    fn test_espresso_and_pizza_scenario() {
        let mut store = CartStore::new();
        store.add_item(espresso());
        store.add_item(espresso());
        store.add_item(pizza());

        assert_eq!(quantities(&store), vec![2, 1]);
        assert_eq!(store.cart().items()[0].id, espresso().id);
        assert_eq!(store.total(), Price::from_units(270));

        store.update_quantity(espresso().id, 0);
        assert_eq!(store.cart().items().len(), 1);
        assert_eq!(store.cart().items()[0].id, pizza().id);
        assert_eq!(store.total(), Price::from_units(180));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let store = CartStore::new();
        assert!(store.total().is_zero());
        assert_eq!(store.cart().item_count(), 0);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut store = CartStore::new();
        store.add_item(pizza());
        let before = store.cart().clone();

        store.remove_item(espresso().id);
        store.update_quantity(espresso().id, 5);
        store.update_quantity(espresso().id, -5);

        assert_eq!(store.cart(), &before);
    }

    #[test]
    fn test_re_adding_keeps_first_snapshot() {
        let mut store = CartStore::new();
        store.add_item(pizza());
        let mut renamed = pizza();
        renamed.name = "Pizza Margherita".to_owned();
        store.add_item(renamed);

        let item = store.cart().get(pizza().id).unwrap();
        assert_eq!(item.name, "Pizza Margarita");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_large_quantity_is_kept_exactly() {
        let mut store = CartStore::new();
        store.add_item(pizza());
        store.update_quantity(pizza().id, 5_000_000_000);
        assert_eq!(quantities(&store), vec![5_000_000_000]);
        store.update_quantity(pizza().id, i64::MAX);
        assert_eq!(quantities(&store), vec![i64::MAX.unsigned_abs()]);
    }

    #[test]
    fn test_total_saturates_instead_of_panicking() {
        let mut store = CartStore::new();
        let mut expensive = pizza();
        expensive.price = Price::parse("10000000000000000000000").unwrap();
        store.add_item(expensive);
        store.add_item(espresso());
        store.update_quantity(pizza().id, 100_000_000);
        assert_eq!(store.total().amount(), rust_decimal::Decimal::MAX);
    }

    #[test]
    fn test_subscribers_see_events_in_order() {
        let seen: Arc<Mutex<Vec<CartEvent>>> = Arc::default();
        let mut store = CartStore::new();
        let sink = Arc::clone(&seen);
        store.subscribe(move |event, _| sink.lock().unwrap().push(*event));

        store.add_item(espresso());
        store.add_item(espresso());
        store.update_quantity(espresso().id, 2);
        store.update_quantity(espresso().id, 5);
        store.remove_item(espresso().id);
        store.remove_item(espresso().id);

        let id = espresso().id;
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                CartEvent::ItemAdded { id },
                CartEvent::QuantityChanged { id, quantity: 2 },
                CartEvent::QuantityChanged { id, quantity: 5 },
                CartEvent::ItemRemoved { id },
            ]
        );
    }

    #[test]
    fn test_subscriber_receives_updated_cart() {
        let totals: Arc<Mutex<Vec<Price>>> = Arc::default();
        let mut store = CartStore::new();
        let sink = Arc::clone(&totals);
        store.subscribe(move |_, cart| sink.lock().unwrap().push(cart.total()));

        store.add_item(pizza());
        store.add_item(espresso());

        assert_eq!(
            *totals.lock().unwrap(),
            vec![Price::from_units(180), Price::from_units(225)]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let calls = Arc::new(Mutex::new(0_u32));
        let mut store = CartStore::new();
        let sink = Arc::clone(&calls);
        let sub = store.subscribe(move |_, _| *sink.lock().unwrap() += 1);

        store.add_item(pizza());
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add_item(pizza());

        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_cart_survives_serde() {
        let mut store = CartStore::new();
        store.add_item(espresso());
        store.add_item(pizza());
        let json = serde_json::to_string(store.cart()).unwrap();

        let resumed = CartStore::from_cart(serde_json::from_str(&json).unwrap());
        assert_eq!(resumed.cart(), store.cart());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u128),
            Remove(u128),
            Update(u128, i64),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0_u128..5).prop_map(Op::Add),
                (0_u128..5).prop_map(Op::Remove),
                ((0_u128..5), -3_i64..10).prop_map(|(id, q)| Op::Update(id, q)),
            ]
        }

        fn catalog(n: u128) -> CartProduct {
            product(n, &format!("Producto {n}"), u32::try_from(n).unwrap() * 10 + 5)
        }

        fn apply(store: &mut CartStore, op: &Op) {
            match *op {
                Op::Add(n) => store.add_item(catalog(n)),
                Op::Remove(n) => store.remove_item(catalog(n).id),
                Op::Update(n, q) => store.update_quantity(catalog(n).id, q),
            }
        }

        proptest! {
            /// Property: N adds of one product give one line with quantity N.
            #[test]
            fn repeated_adds_accumulate(n in 1_u64..50) {
                let mut store = CartStore::new();
                for _ in 0..n {
                    store.add_item(espresso());
                }
                prop_assert_eq!(store.cart().items().len(), 1);
                prop_assert_eq!(store.cart().items()[0].quantity, n);
            }

            /// Property: update to q <= 0 removes; q >= 1 sets exactly q.
            #[test]
            fn update_quantity_sets_or_removes(q in any::<i64>()) {
                let mut store = CartStore::new();
                store.add_item(espresso());
                store.update_quantity(espresso().id, q);

                match store.cart().get(espresso().id) {
                    Some(item) => {
                        prop_assert!(q >= 1);
                        prop_assert_eq!(item.quantity, q.unsigned_abs());
                    }
                    None => prop_assert!(q <= 0),
                }
            }

            /// Property: invariants hold after any operation sequence.
            #[test]
            fn invariants_hold(ops in prop::collection::vec(op(), 0..40)) {
                let mut store = CartStore::new();
                for op in &ops {
                    apply(&mut store, op);
                }

                let items = store.cart().items();
                let expected: Price = items.iter().map(|i| i.price.times(i.quantity)).sum();
                prop_assert_eq!(store.total(), expected);
                prop_assert!(items.iter().all(|i| i.quantity >= 1));
                for (i, a) in items.iter().enumerate() {
                    prop_assert!(items.iter().skip(i + 1).all(|b| b.id != a.id));
                }
            }

            /// Property: removing twice equals removing once.
            #[test]
            fn remove_is_idempotent(ops in prop::collection::vec(op(), 0..20), n in 0_u128..5) {
                let mut once = CartStore::new();
                for op in &ops {
                    apply(&mut once, op);
                }
                let mut twice = CartStore::from_cart(once.cart().clone());

                once.remove_item(catalog(n).id);
                twice.remove_item(catalog(n).id);
                twice.remove_item(catalog(n).id);
                prop_assert_eq!(once.cart(), twice.cart());
            }
        }
    }
}
