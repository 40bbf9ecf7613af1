//! Record images.
//!
//! Every displayable record may carry an uploaded image. A record without
//! one is in the explicit [`ImageSource::Missing`] state; only rendering
//! substitutes the placeholder photo.

use serde::{Deserialize, Serialize};

/// Photo shown wherever a record has no image of its own.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?q=80&w=2070&auto=format&fit=crop";

/// Where a record's image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum ImageSource {
    /// A URL stored with the record (usually an object-storage public URL).
    Uploaded(String),
    /// No image was provided.
    #[default]
    Missing,
}

impl ImageSource {
    /// Build from a nullable column or optional form field.
    ///
    /// Blank strings count as missing.
    #[must_use]
    pub fn from_optional(url: Option<&str>) -> Self {
        match url.map(str::trim) {
            Some(url) if !url.is_empty() => Self::Uploaded(url.to_owned()),
            _ => Self::Missing,
        }
    }

    /// The stored URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Uploaded(url) => Some(url),
            Self::Missing => None,
        }
    }

    /// URL to render: the stored one or the placeholder.
    #[must_use]
    pub fn display_url(&self) -> &str {
        self.url().unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    /// Whether no image was provided.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_missing() {
        assert_eq!(ImageSource::from_optional(None), ImageSource::Missing);
        assert_eq!(ImageSource::from_optional(Some("  ")), ImageSource::Missing);
    }

    #[test]
    fn test_display_url_falls_back_to_placeholder() {
        assert_eq!(ImageSource::Missing.display_url(), PLACEHOLDER_IMAGE_URL);
        let uploaded = ImageSource::from_optional(Some(" https://cdn/x.jpg "));
        assert_eq!(uploaded.display_url(), "https://cdn/x.jpg");
        assert!(!uploaded.is_missing());
    }
}
