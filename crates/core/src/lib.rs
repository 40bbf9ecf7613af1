//! Cafe Ancestral Core - Shared domain library.
//!
//! This crate provides the types and logic shared by every Cafe Ancestral
//! component:
//! - `storefront` - Public site: menu, blog, hero carousel and cart
//! - `admin` - Content management panel
//! - `cli` - Command-line tools for migrations, seeding and admin accounts
//!
//! # Architecture
//!
//! The core crate does no I/O: no HTTP, no sessions, and database access only
//! as row shapes behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, slugs, images and links
//! - [`records`] - The six content records
//! - [`cart`] - Cart data and the observable [`CartStore`]
//! - [`order`] - Order message composer and WhatsApp handoff
//! - `rows` - Database rows (`postgres` feature)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod records;
#[cfg(feature = "postgres")]
pub mod rows;
pub mod types;

pub use cart::{Cart, CartEvent, CartLineItem, CartProduct, CartStore, SubscriptionId};
pub use order::{
    DEFAULT_GREETING, MerchantPhone, OrderHandoff, PhoneError, WHATSAPP_BASE_URL,
    compose_order_message,
};
pub use records::{
    BlogPost, Category, CategoryKind, FeaturedItem, HeroBanner, MAX_FEATURED_ITEMS, Offer,
    Product, UnknownCategoryKind,
};
pub use types::*;
