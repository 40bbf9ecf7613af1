//! Session-related types.
//!
//! The shopper's cart is the only thing the storefront keeps in the session.

/// Session keys for shopper state.
pub mod keys {
    /// Key for the serialized shopper cart.
    pub const CART: &str = "cart";
}
