//! Cart to WhatsApp order, using catalog records the way the storefront does.

#![allow(clippy::unwrap_used)]

use cafe_ancestral_core::{
    CartEvent, CartProduct, CartStore, CategoryId, ImageSource, MerchantPhone, OrderHandoff,
    PLACEHOLDER_IMAGE_URL, Price, Product, ProductId, compose_order_message,
};
use chrono::Utc;
use uuid::Uuid;

fn product(n: u128, name: &str, price: u32, image: ImageSource) -> Product {
    Product {
        id: ProductId::new(Uuid::from_u128(n)),
        category_id: CategoryId::new(Uuid::from_u128(100)),
        name: name.to_string(),
        description: String::new(),
        price: Price::from_units(price),
        image,
        ingredients: None,
        allergens: None,
        is_available: true,
        created_at: Utc::now(),
    }
}

#[test]
fn test_order_message_for_a_typical_cart() {
    let espresso = product(
        1,
        "Espresso Doble",
        45,
        ImageSource::from_optional(Some("https://cdn.example.com/espresso.jpg")),
    );
    let pizza = product(2, "Pizza Margarita", 180, ImageSource::Missing);

    let mut store = CartStore::new();
    store.add_item(CartProduct::from(&espresso));
    store.add_item(CartProduct::from(&pizza));
    store.add_item(CartProduct::from(&espresso));

    assert_eq!(store.total(), Price::from_units(270));
    assert_eq!(
        compose_order_message(store.cart()),
        "- 2x Espresso Doble ($90)\n- 1x Pizza Margarita ($180)\n\nTotal: $270"
    );

    let line = store.cart().get(pizza.id).map(|l| l.image_url.clone());
    assert_eq!(line.as_deref(), Some(PLACEHOLDER_IMAGE_URL));
}

#[test]
fn test_quantity_changes_flow_into_the_link() {
    let cold_brew = product(3, "Cold Brew", 65, ImageSource::Missing);
    let handoff = OrderHandoff::new(MerchantPhone::parse("+52 1 234 567 890").unwrap());

    let mut store = CartStore::new();
    store.add_item(CartProduct::from(&cold_brew));
    store.update_quantity(cold_brew.id, 4);

    let url = handoff.url(store.cart());
    assert!(url.starts_with("https://wa.me/521234567890?text="));
    assert!(url.contains("4x%20Cold%20Brew"));
    assert!(url.ends_with("Total%3A%20%24260"));

    store.update_quantity(cold_brew.id, 0);
    assert!(store.cart().is_empty());
    assert!(handoff.message(store.cart()).ends_with("\nTotal: $0"));
}

#[test]
fn test_subscribers_see_every_change_in_order() {
    use std::sync::{Arc, Mutex};

    let espresso = product(1, "Espresso Doble", 45, ImageSource::Missing);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut store = CartStore::new();
    let sink = Arc::clone(&seen);
    store.subscribe(move |event, cart| {
        sink.lock().unwrap().push((*event, cart.item_count()));
    });

    store.add_item(CartProduct::from(&espresso));
    store.update_quantity(espresso.id, 3);
    store.remove_item(espresso.id);

    let seen = seen.lock().unwrap().clone();
    let counts: Vec<u64> = seen.iter().map(|(_, count)| *count).collect();
    assert_eq!(counts, [1, 3, 0]);
    assert!(matches!(seen.first(), Some((CartEvent::ItemAdded { .. }, _))));
}
