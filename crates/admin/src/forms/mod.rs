//! Admin form parsing and validation.
//!
//! Each record type has a `*Form` that mirrors the HTML form field for field
//! (all strings, so a rejected submission can be re-rendered as typed) and
//! validates into a `*Input` the repositories write. Only shape is checked
//! here: required fields, numbers, prices, dates and links. Uniqueness and
//! references are left to the database.

pub mod blog_post;
pub mod category;
pub mod featured_item;
pub mod hero_banner;
pub mod offer;
pub mod product;

pub use blog_post::{BlogPostForm, BlogPostInput};
pub use category::{CategoryForm, CategoryInput};
pub use featured_item::{FeaturedItemForm, FeaturedItemInput};
pub use hero_banner::{HeroBannerForm, HeroBannerInput};
pub use offer::{OfferForm, OfferInput};
pub use product::{ProductForm, ProductInput};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use cafe_ancestral_core::{
    ImageSource, LinkError, LinkKind, LinkTarget, MAX_FEATURED_ITEMS, PriceError, SlugError,
    UnknownCategoryKind,
};

/// Format used by `<input type="datetime-local">`.
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A submission that cannot become a record. Messages are shown to admins.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("El campo «{0}» es obligatorio")]
    Required(&'static str),

    #[error("El campo «{0}» debe ser un número entero")]
    NotAnInteger(&'static str),

    #[error("Fecha inválida en «{0}»")]
    InvalidDate(&'static str),

    #[error("La fecha de fin debe ser igual o posterior a la de inicio")]
    EndBeforeStart,

    #[error("Precio inválido: {0}")]
    Price(#[from] PriceError),

    #[error("Slug inválido: {0}")]
    Slug(#[from] SlugError),

    #[error("Enlace inválido: {0}")]
    Link(#[from] LinkError),

    #[error("Tipo de categoría inválido: {0}")]
    CategoryKind(#[from] UnknownCategoryKind),

    #[error("Selecciona una categoría válida")]
    Category,

    #[error("Solo se permiten {max} elementos destacados", max = MAX_FEATURED_ITEMS)]
    TooManyFeatured,
}

/// Trimmed value of a required field.
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_owned())
}

/// Trimmed value of an optional field; blank is `None`.
pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// HTML checkboxes submit a value only when ticked.
pub(crate) fn checkbox(value: Option<&str>) -> bool {
    value.is_some_and(|v| !matches!(v.trim(), "" | "false" | "off" | "0"))
}

/// Sort order field; blank means 0.
pub(crate) fn sort_order(value: &str) -> Result<i32, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| FormError::NotAnInteger("orden"))
}

/// Image URL field; blank means no image.
pub(crate) fn image(value: &str) -> ImageSource {
    ImageSource::from_optional(Some(value))
}

/// Link picker fields shared by featured items and hero banners.
///
/// The form offers one input per link kind; only the one matching
/// `link_kind` is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFields<'a> {
    pub kind: &'a str,
    pub url: &'a str,
    pub category: &'a str,
    pub product: &'a str,
    pub blog: &'a str,
}

impl LinkFields<'_> {
    pub(crate) fn validate(&self) -> Result<LinkTarget, FormError> {
        let kind: LinkKind = self.kind.parse()?;
        let value = match kind {
            LinkKind::Custom => self.url,
            LinkKind::Category => self.category,
            LinkKind::Product => self.product,
            LinkKind::Blog => self.blog,
        };
        Ok(LinkTarget::from_parts(kind.as_str(), value)?)
    }
}

/// Split a stored link back into picker values: `[kind, url, category, product, blog]`.
pub(crate) fn link_fields(link: &LinkTarget) -> [String; 5] {
    let value = link.value();
    let pick = |kind: LinkKind| {
        if link.kind() == kind {
            value.clone()
        } else {
            String::new()
        }
    };
    [
        link.kind().as_str().to_owned(),
        pick(LinkKind::Custom),
        pick(LinkKind::Category),
        pick(LinkKind::Product),
        pick(LinkKind::Blog),
    ]
}

/// Parse a submitted timestamp, read as UTC.
///
/// Accepts RFC 3339, `datetime-local` values (with or without seconds) and
/// plain dates (midnight).
pub(crate) fn datetime(value: &str, field: &'static str) -> Result<DateTime<Utc>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    [DATETIME_LOCAL_FORMAT, "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
        .ok_or(FormError::InvalidDate(field))
}

/// Render a timestamp for a `datetime-local` input.
#[must_use]
pub fn datetime_local(value: &DateTime<Utc>) -> String {
    value.format(DATETIME_LOCAL_FORMAT).to_string()
}
