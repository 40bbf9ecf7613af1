//! Order message composition and the WhatsApp handoff.
//!
//! The site never places orders itself. Checkout turns the cart into a
//! plain-text message and opens a pre-filled WhatsApp chat with the cafe.

use core::fmt;
use core::str::FromStr;

use crate::cart::Cart;

/// Base of every handoff link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Greeting the site has always opened orders with.
pub const DEFAULT_GREETING: &str = "Hola! Me gustaría hacer un pedido:";

/// Render the cart as the order message body.
///
/// One line per item in cart order, a blank line, then the total:
///
/// ```
/// use cafe_ancestral_core::{compose_order_message, CartProduct, CartStore, Price, ProductId};
///
/// let mut store = CartStore::new();
/// store.add_item(CartProduct {
///     id: ProductId::generate(),
///     name: "Pizza Margarita".to_owned(),
///     price: Price::from_units(180),
///     image_url: String::new(),
/// });
/// assert_eq!(
///     compose_order_message(store.cart()),
///     "- 1x Pizza Margarita ($180)\n\nTotal: $180"
/// );
/// ```
///
/// An empty cart is valid and yields `"\nTotal: $0"`.
#[must_use]
pub fn compose_order_message(cart: &Cart) -> String {
    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| format!("- {}x {} ({})", item.quantity, item.name, item.subtotal()))
        .collect();
    lines.push(String::new());
    lines.push(format!("Total: {}", cart.total()));
    lines.join("\n")
}

// =============================================================================
// Merchant phone
// =============================================================================

/// Errors that can occur when parsing a [`MerchantPhone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// No digits at all.
    #[error("phone number cannot be empty")]
    Empty,
    /// A character other than digits, `+`, spaces, dashes, dots or parentheses.
    #[error("invalid character {0:?} in phone number")]
    InvalidCharacter(char),
    /// Too few or too many digits for an international number.
    #[error("phone number must have 8 to 15 digits (got {0})")]
    BadLength(usize),
}

/// The cafe's WhatsApp number in international digits-only form
/// (`521234567890`), as `wa.me` expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MerchantPhone(String);

impl MerchantPhone {
    /// Parse a human-written number such as `+52 1 234-567-890`.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] for stray characters or a digit count
    /// outside 8..=15.
    pub fn parse(input: &str) -> Result<Self, PhoneError> {
        let mut digits = String::with_capacity(input.len());
        for c in input.trim().chars() {
            match c {
                '0'..='9' => digits.push(c),
                '+' | ' ' | '-' | '.' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        match digits.len() {
            0 => Err(PhoneError::Empty),
            8..=15 => Ok(Self(digits)),
            n => Err(PhoneError::BadLength(n)),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MerchantPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MerchantPhone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Handoff
// =============================================================================

/// Builds `https://wa.me/<phone>?text=<message>` links for a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHandoff {
    phone: MerchantPhone,
    greeting: Option<String>,
}

impl OrderHandoff {
    /// A handoff with no greeting line.
    #[must_use]
    pub const fn new(phone: MerchantPhone) -> Self {
        Self {
            phone,
            greeting: None,
        }
    }

    /// Prefix every message with `greeting` and a blank line.
    ///
    /// A blank greeting disables the prefix.
    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        self.greeting = (!greeting.trim().is_empty()).then_some(greeting);
        self
    }

    #[must_use]
    pub const fn phone(&self) -> &MerchantPhone {
        &self.phone
    }

    /// Full text sent to the chat, greeting included.
    #[must_use]
    pub fn message(&self, cart: &Cart) -> String {
        let body = compose_order_message(cart);
        match &self.greeting {
            Some(greeting) => format!("{greeting}\n\n{body}"),
            None => body,
        }
    }

    /// The percent-encoded handoff link.
    #[must_use]
    pub fn url(&self, cart: &Cart) -> String {
        let message = self.message(cart);
        format!(
            "{WHATSAPP_BASE_URL}{}?text={}",
            self.phone,
            urlencoding::encode(&message)
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::{CartProduct, CartStore};
    use crate::types::{Price, ProductId};
    use uuid::Uuid;

    fn add(store: &mut CartStore, n: u128, name: &str, price: u32) {
        store.add_item(CartProduct {
            id: ProductId::new(Uuid::from_u128(n)),
            name: name.to_owned(),
            price: Price::from_units(price),
            image_url: String::new(),
        });
    }

    fn handoff() -> OrderHandoff {
        OrderHandoff::new(MerchantPhone::parse("+52 1 234 567 890").unwrap())
    }

    #[test]
    fn test_single_item_message() {
        let mut store = CartStore::new();
        add(&mut store, 2, "Pizza Margarita", 180);
        assert_eq!(
            compose_order_message(store.cart()),
            "- 1x Pizza Margarita ($180)\n\nTotal: $180"
        );
    }

    #[test]
    fn test_multi_item_message_uses_line_subtotals() {
        let mut store = CartStore::new();
        add(&mut store, 1, "Espresso Doble", 45);
        add(&mut store, 1, "Espresso Doble", 45);
        add(&mut store, 3, "Cold Brew", 65);
        assert_eq!(
            compose_order_message(store.cart()),
            "- 2x Espresso Doble ($90)\n- 1x Cold Brew ($65)\n\nTotal: $155"
        );
    }

    #[test]
    fn test_line_count_is_items_plus_two() {
        let mut store = CartStore::new();
        for n in 0..4 {
            add(&mut store, n, "Item", 10);
            let message = compose_order_message(store.cart());
            assert_eq!(message.split('\n').count(), store.cart().items().len() + 2);
        }
    }

    #[test]
    fn test_empty_cart_message() {
        let message = compose_order_message(&Cart::new());
        assert_eq!(message, "\nTotal: $0");
        assert_eq!(message.split('\n').count(), 2);
    }

    #[test]
    fn test_url_encodes_message() {
        let mut store = CartStore::new();
        add(&mut store, 2, "Pizza Margarita", 180);
        assert_eq!(
            handoff().url(store.cart()),
            "https://wa.me/521234567890?text=-%201x%20Pizza%20Margarita%20%28%24180%29%0A%0ATotal%3A%20%24180"
        );
    }

    #[test]
    fn test_greeting_prefix() {
        let mut store = CartStore::new();
        add(&mut store, 2, "Pizza Margarita", 180);
        let handoff = handoff().with_greeting(DEFAULT_GREETING);
        assert_eq!(
            handoff.message(store.cart()),
            "Hola! Me gustaría hacer un pedido:\n\n- 1x Pizza Margarita ($180)\n\nTotal: $180"
        );
        assert!(handoff.url(store.cart()).contains("Hola%21%20Me%20gustar%C3%ADa"));
    }

    #[test]
    fn test_blank_greeting_is_disabled() {
        let handoff = handoff().with_greeting("   ");
        assert_eq!(handoff.message(&Cart::new()), "\nTotal: $0");
    }

    #[test]
    fn test_phone_parsing() {
        assert_eq!(MerchantPhone::parse("52-1-234-567-890").unwrap().as_str(), "521234567890");
        assert_eq!(MerchantPhone::parse("  "), Err(PhoneError::Empty));
        assert_eq!(MerchantPhone::parse("1234"), Err(PhoneError::BadLength(4)));
        assert_eq!(
            MerchantPhone::parse("52x1234567890"),
            Err(PhoneError::InvalidCharacter('x'))
        );
    }
}
