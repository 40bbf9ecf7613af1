//! Core types for Cafe Ancestral.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod image;
pub mod link;
pub mod price;
pub mod slug;

pub use email::{Email, EmailError};
pub use id::*;
pub use image::{ImageSource, PLACEHOLDER_IMAGE_URL};
pub use link::{LinkError, LinkKind, LinkTarget};
pub use price::{Price, PriceError};
pub use slug::{Slug, SlugError};
