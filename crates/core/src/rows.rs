//! Database row shapes and their conversion into records.
//!
//! Rows mirror the table columns one to one. Converting a row into a record
//! validates everything the column types cannot (slugs, prices, link pairs),
//! so a hand-edited row surfaces as a [`RecordError`] instead of a panic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::records::{
    BlogPost, Category, CategoryKind, FeaturedItem, HeroBanner, Offer, Product,
    UnknownCategoryKind,
};
use crate::types::{
    BlogPostId, CategoryId, FeaturedItemId, HeroBannerId, ImageSource, LinkError, LinkTarget,
    OfferId, Price, PriceError, ProductId, SlugError, Slug,
};

/// A stored row that does not form a valid record.
#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("invalid slug: {0}")]
    Slug(#[from] SlugError),
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
    #[error("invalid link: {0}")]
    Link(#[from] LinkError),
    #[error(transparent)]
    CategoryKind(#[from] UnknownCategoryKind),
}

// Column lists in `FromRow` field order, for `SELECT` and `RETURNING`.

pub const CATEGORY_COLUMNS: &str = "id, name, slug, kind, sort_order, created_at";
pub const PRODUCT_COLUMNS: &str = "id, category_id, name, description, price, image_url, \
     ingredients, allergens, is_available, created_at";
pub const OFFER_COLUMNS: &str =
    "id, title, description, price, image_url, is_active, start_date, end_date, created_at";
pub const BLOG_COLUMNS: &str =
    "id, title, excerpt, content, image_url, published_at, is_published, created_at";
pub const FEATURED_COLUMNS: &str = "id, title, subtitle, description, image_url, link_kind, \
     link_value, sort_order, is_active, created_at";
pub const HERO_COLUMNS: &str = "id, title, subtitle, description, image_url, cta_text, link_kind, \
     link_value, sort_order, is_active, created_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RecordError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            slug: Slug::parse(&row.slug)?,
            kind: row.kind.parse::<CategoryKind>()?,
            sort_order: row.sort_order,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RecordError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            price: Price::new(row.price)?,
            image: ImageSource::from_optional(row.image_url.as_deref()),
            ingredients: non_blank(row.ingredients),
            allergens: non_blank(row.allergens),
            is_available: row.is_available,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OfferRow {
    pub id: OfferId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<OfferRow> for Offer {
    type Error = RecordError;

    fn try_from(row: OfferRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: Price::new(row.price)?,
            image: ImageSource::from_optional(row.image_url.as_deref()),
            is_active: row.is_active,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogPostRow {
    pub id: BlogPostId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            excerpt: row.excerpt,
            content: row.content,
            image: ImageSource::from_optional(row.image_url.as_deref()),
            published_at: row.published_at,
            is_published: row.is_published,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeaturedItemRow {
    pub id: FeaturedItemId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_kind: String,
    pub link_value: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<FeaturedItemRow> for FeaturedItem {
    type Error = RecordError;

    fn try_from(row: FeaturedItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            subtitle: non_blank(row.subtitle),
            description: non_blank(row.description),
            image: ImageSource::from_optional(row.image_url.as_deref()),
            link: LinkTarget::from_parts(&row.link_kind, &row.link_value)?,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HeroBannerRow {
    pub id: HeroBannerId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cta_text: String,
    pub link_kind: String,
    pub link_value: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<HeroBannerRow> for HeroBanner {
    type Error = RecordError;

    fn try_from(row: HeroBannerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            subtitle: non_blank(row.subtitle),
            description: non_blank(row.description),
            image: ImageSource::from_optional(row.image_url.as_deref()),
            cta_text: row.cta_text,
            link: LinkTarget::from_parts(&row.link_kind, &row.link_value)?,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

/// Convert a batch of rows, failing on the first bad one.
///
/// # Errors
///
/// Returns the first conversion error.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, RecordError>
where
    T: TryFrom<R, Error = RecordError>,
{
    rows.into_iter().map(T::try_from).collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn featured_row(kind: &str, value: &str) -> FeaturedItemRow {
        FeaturedItemRow {
            id: FeaturedItemId::generate(),
            title: "Nuevo Cold Brew".to_owned(),
            subtitle: Some(String::new()),
            description: None,
            image_url: Some("   ".to_owned()),
            link_kind: kind.to_owned(),
            link_value: value.to_owned(),
            sort_order: 1,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_featured_row_normalizes_optionals() {
        let id = ProductId::new(Uuid::from_u128(3));
        let item = FeaturedItem::try_from(featured_row("product", &id.to_string())).unwrap();
        assert_eq!(item.link, LinkTarget::Product(id));
        assert_eq!(item.subtitle, None);
        assert!(item.image.is_missing());
    }

    #[test]
    fn test_bad_link_pair_is_rejected() {
        assert!(matches!(
            FeaturedItem::try_from(featured_row("product", "espresso")),
            Err(RecordError::Link(_))
        ));
    }

    #[test]
    fn test_negative_price_row_is_rejected() {
        let row = ProductRow {
            id: ProductId::generate(),
            category_id: CategoryId::generate(),
            name: "Cold Brew".to_owned(),
            description: String::new(),
            price: Decimal::new(-65, 0),
            image_url: None,
            ingredients: None,
            allergens: None,
            is_available: true,
            created_at: Utc::now(),
        };
        assert!(matches!(Product::try_from(row), Err(RecordError::Price(_))));
    }

    #[test]
    fn test_category_row_kind_and_slug() {
        let row = CategoryRow {
            id: CategoryId::generate(),
            name: "Postres".to_owned(),
            slug: "postres".to_owned(),
            kind: "food".to_owned(),
            sort_order: 5,
            created_at: Utc::now(),
        };
        let rows: Vec<Category> = convert_all(vec![row]).unwrap();
        assert_eq!(rows[0].kind, CategoryKind::Food);
        assert_eq!(rows[0].slug.as_str(), "postres");
    }

    #[test]
    fn test_blog_rows_convert_without_validation() {
        let row = BlogPostRow {
            id: BlogPostId::generate(),
            title: "Nuestro tueste".to_owned(),
            excerpt: "Cómo tostamos".to_owned(),
            content: "# Tueste".to_owned(),
            image_url: None,
            published_at: Utc::now(),
            is_published: false,
            created_at: Utc::now(),
        };
        let posts: Vec<BlogPost> = vec![row].into_iter().map(BlogPost::from).collect();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].image.is_missing());
        assert!(!posts[0].is_published);
    }
}
