//! Link targets for featured items and hero banners.
//!
//! A link is stored as two columns, `link_kind` and `link_value`, and lives
//! in memory as a tagged [`LinkTarget`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::{BlogPostId, CategoryId, ProductId};
use crate::records::Category;

/// Errors that can occur when decoding a stored or submitted link.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The discriminator is not one of the known kinds.
    #[error("unknown link kind: {0:?}")]
    UnknownKind(String),
    /// A record link does not carry a valid record id.
    #[error("invalid {kind} id: {value:?}")]
    InvalidId {
        /// The link kind being decoded.
        kind: LinkKind,
        /// The offending value.
        value: String,
    },
    /// A custom link has no URL.
    #[error("custom link cannot be empty")]
    EmptyUrl,
}

/// The discriminator column of a stored link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Custom,
    Category,
    Product,
    Blog,
}

impl LinkKind {
    /// All kinds, in the order the admin form lists them.
    pub const ALL: [Self; 4] = [Self::Custom, Self::Category, Self::Product, Self::Blog];

    /// Stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Category => "category",
            Self::Product => "product",
            Self::Blog => "blog",
        }
    }

    /// Label shown in the admin form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Custom => "URL personalizada",
            Self::Category => "Categoría",
            Self::Product => "Producto",
            Self::Blog => "Entrada del blog",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkKind {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "custom" => Ok(Self::Custom),
            "category" => Ok(Self::Category),
            "product" => Ok(Self::Product),
            "blog" => Ok(Self::Blog),
            other => Err(LinkError::UnknownKind(other.to_owned())),
        }
    }
}

/// Where a featured item or hero banner sends the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LinkTarget {
    /// Any URL, absolute or site-relative.
    Custom(String),
    /// A menu category, rendered as a filtered menu link.
    Category(CategoryId),
    /// A single product, rendered as an anchor on the menu page.
    Product(ProductId),
    /// A blog post.
    #[serde(rename = "blog")]
    BlogPost(BlogPostId),
}

impl LinkTarget {
    /// Decode the `(link_kind, link_value)` column pair.
    ///
    /// # Errors
    ///
    /// Returns a [`LinkError`] for an unknown kind, a record link whose value
    /// is not a UUID, or a blank custom URL.
    pub fn from_parts(kind: &str, value: &str) -> Result<Self, LinkError> {
        let kind: LinkKind = kind.parse()?;
        let value = value.trim();
        let invalid = || LinkError::InvalidId {
            kind,
            value: value.to_owned(),
        };

        match kind {
            LinkKind::Custom if value.is_empty() => Err(LinkError::EmptyUrl),
            LinkKind::Custom => Ok(Self::Custom(value.to_owned())),
            LinkKind::Category => value.parse().map(Self::Category).map_err(|_| invalid()),
            LinkKind::Product => value.parse().map(Self::Product).map_err(|_| invalid()),
            LinkKind::Blog => value.parse().map(Self::BlogPost).map_err(|_| invalid()),
        }
    }

    /// The discriminator column value.
    #[must_use]
    pub const fn kind(&self) -> LinkKind {
        match self {
            Self::Custom(_) => LinkKind::Custom,
            Self::Category(_) => LinkKind::Category,
            Self::Product(_) => LinkKind::Product,
            Self::BlogPost(_) => LinkKind::Blog,
        }
    }

    /// The value column.
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Self::Custom(url) => url.clone(),
            Self::Category(id) => id.to_string(),
            Self::Product(id) => id.to_string(),
            Self::BlogPost(id) => id.to_string(),
        }
    }

    /// Resolve to a site href.
    ///
    /// Category links need the category's slug; a link to a category that
    /// no longer exists falls back to the unfiltered menu.
    #[must_use]
    pub fn href(&self, categories: &[Category]) -> String {
        match self {
            Self::Custom(url) => url.clone(),
            Self::Category(id) => categories
                .iter()
                .find(|c| c.id == *id)
                .map_or_else(
                    || "/menu".to_owned(),
                    |c| format!("/menu?category={}", c.slug),
                ),
            Self::Product(id) => format!("/menu#{id}"),
            Self::BlogPost(id) => format!("/blog/{id}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::records::CategoryKind;
    use crate::types::Slug;
    use chrono::Utc;
    use uuid::Uuid;

    fn bebidas() -> Category {
        Category {
            id: CategoryId::new(Uuid::from_u128(2)),
            name: "Bebidas Frías".to_owned(),
            slug: Slug::from_name("Bebidas Frías").unwrap(),
            kind: CategoryKind::Drink,
            sort_order: 2,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_href_per_kind() {
        let categories = vec![bebidas()];
        let product = ProductId::new(Uuid::from_u128(3));
        let post = BlogPostId::new(Uuid::from_u128(4));

        assert_eq!(
            LinkTarget::Category(categories[0].id).href(&categories),
            "/menu?category=bebidas-frias"
        );
        assert_eq!(
            LinkTarget::Product(product).href(&categories),
            "/menu#00000000-0000-0000-0000-000000000003"
        );
        assert_eq!(
            LinkTarget::BlogPost(post).href(&categories),
            "/blog/00000000-0000-0000-0000-000000000004"
        );
        assert_eq!(
            LinkTarget::Custom("/about".to_owned()).href(&categories),
            "/about"
        );
    }

    #[test]
    fn test_missing_category_falls_back_to_menu() {
        let gone = LinkTarget::Category(CategoryId::new(Uuid::from_u128(99)));
        assert_eq!(gone.href(&[bebidas()]), "/menu");
    }

    #[test]
    fn test_from_parts_matches_columns() {
        let id = ProductId::new(Uuid::from_u128(3));
        let link = LinkTarget::Product(id);
        let decoded = LinkTarget::from_parts(link.kind().as_str(), &link.value()).unwrap();
        assert_eq!(decoded, link);
    }

    #[test]
    fn test_from_parts_errors() {
        assert!(matches!(
            LinkTarget::from_parts("page", "/x"),
            Err(LinkError::UnknownKind(_))
        ));
        assert!(matches!(
            LinkTarget::from_parts("category", "pizzas"),
            Err(LinkError::InvalidId {
                kind: LinkKind::Category,
                ..
            })
        ));
        assert_eq!(
            LinkTarget::from_parts("custom", "  "),
            Err(LinkError::EmptyUrl)
        );
    }
}
