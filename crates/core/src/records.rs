//! The six content records managed from the admin panel.
//!
//! These are the validated in-memory shapes. Database rows decode into them
//! through [`crate::rows`] (with the `postgres` feature).

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    BlogPostId, CategoryId, FeaturedItemId, HeroBannerId, ImageSource, LinkTarget, OfferId, Price,
    ProductId, Slug,
};

/// How many featured items the home page shows.
pub const MAX_FEATURED_ITEMS: usize = 3;

// =============================================================================
// Category
// =============================================================================

/// Whether a category holds food or drinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Food,
    Drink,
}

/// Error returned when parsing an unknown [`CategoryKind`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category kind: {0:?}")]
pub struct UnknownCategoryKind(pub String);

impl CategoryKind {
    /// Stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Drink => "drink",
        }
    }

    /// Spanish label used on the site.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "Comida",
            Self::Drink => "Bebida",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = UnknownCategoryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "food" => Ok(Self::Food),
            "drink" => Ok(Self::Drink),
            other => Err(UnknownCategoryKind(other.to_owned())),
        }
    }
}

/// A menu section such as "Pizzas" or "Café Caliente".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub kind: CategoryKind,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: ImageSource,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    /// Unavailable products stay on the menu but cannot be ordered.
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Offer
// =============================================================================

/// A time-boxed promotion shown above the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub image: ImageSource,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Whether the offer is active and `now` falls inside its window
    /// (both ends inclusive).
    #[must_use]
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.start_date <= now && now <= self.end_date
    }
}

// =============================================================================
// Blog
// =============================================================================

/// A blog post. `content` is Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: ImageSource,
    pub published_at: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Home page
// =============================================================================

/// A card in the home page "featured" strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedItem {
    pub id: FeaturedItemId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: ImageSource,
    pub link: LinkTarget,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A slide in the home page hero carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroBanner {
    pub id: HeroBannerId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: ImageSource,
    pub cta_text: String,
    pub link: LinkTarget,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offer(is_active: bool) -> Offer {
        Offer {
            id: OfferId::generate(),
            title: "2x1 en Cold Brew".to_owned(),
            description: "Solo los martes".to_owned(),
            price: Price::from_units(65),
            image: ImageSource::Missing,
            is_active,
            start_date: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 5, 31, 23, 59, 59).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_offer_window_is_inclusive() {
        let offer = offer(true);
        assert!(offer.is_running(offer.start_date));
        assert!(offer.is_running(offer.end_date));
        assert!(!offer.is_running(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
        assert!(!offer.is_running(Utc.with_ymd_and_hms(2024, 4, 30, 23, 0, 0).unwrap()));
    }

    #[test]
    fn test_inactive_offer_never_runs() {
        let offer = offer(false);
        assert!(!offer.is_running(Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_category_kind_parse() {
        assert_eq!("drink".parse::<CategoryKind>().unwrap(), CategoryKind::Drink);
        assert_eq!(CategoryKind::Food.to_string(), "food");
        assert!("dessert".parse::<CategoryKind>().is_err());
    }
}
