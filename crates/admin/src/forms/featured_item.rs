//! Featured item form.

use serde::Deserialize;

use cafe_ancestral_core::{FeaturedItem, ImageSource, LinkTarget};

use super::{FormError, LinkFields, checkbox, image, link_fields, optional, required, sort_order};

/// Submitted featured item form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeaturedItemForm {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub link_kind: String,
    pub link_url: String,
    pub link_category: String,
    pub link_product: String,
    pub link_blog: String,
    pub sort_order: String,
    pub is_active: Option<String>,
}

/// A validated featured item ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedItemInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: ImageSource,
    pub link: LinkTarget,
    pub sort_order: i32,
    pub is_active: bool,
}

impl FeaturedItemForm {
    /// Validate the submission.
    ///
    /// The three-item limit is checked against the table by the create
    /// handler, not here.
    ///
    /// # Errors
    ///
    /// Returns `FormError` for a blank title, a bad link or sort order.
    pub fn validate(&self) -> Result<FeaturedItemInput, FormError> {
        let link = LinkFields {
            kind: &self.link_kind,
            url: &self.link_url,
            category: &self.link_category,
            product: &self.link_product,
            blog: &self.link_blog,
        }
        .validate()?;

        Ok(FeaturedItemInput {
            title: required(&self.title, "título")?,
            subtitle: optional(&self.subtitle),
            description: optional(&self.description),
            image: image(&self.image_url),
            link,
            sort_order: sort_order(&self.sort_order)?,
            is_active: checkbox(self.is_active.as_deref()),
        })
    }
}

impl From<&FeaturedItem> for FeaturedItemForm {
    fn from(item: &FeaturedItem) -> Self {
        let [link_kind, link_url, link_category, link_product, link_blog] =
            link_fields(&item.link);
        Self {
            title: item.title.clone(),
            subtitle: item.subtitle.clone().unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
            image_url: item.image.url().unwrap_or_default().to_owned(),
            link_kind,
            link_url,
            link_category,
            link_product,
            link_blog,
            sort_order: item.sort_order.to_string(),
            is_active: item.is_active.then(|| "on".to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cafe_ancestral_core::{CategoryId, FeaturedItemId};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_category_link() {
        let category = CategoryId::new(Uuid::from_u128(2));
        let form = FeaturedItemForm {
            title: "Bebidas frías".to_owned(),
            link_kind: "category".to_owned(),
            link_category: category.to_string(),
            is_active: Some("on".to_owned()),
            ..FeaturedItemForm::default()
        };

        let input = form.validate().unwrap();
        assert_eq!(input.link, LinkTarget::Category(category));
        assert_eq!(input.subtitle, None);
        assert_eq!(input.sort_order, 0);
        assert!(input.is_active);
    }

    #[test]
    fn test_edit_prefill_keeps_link() {
        let item = FeaturedItem {
            id: FeaturedItemId::new(Uuid::from_u128(1)),
            title: "Nuestra historia".to_owned(),
            subtitle: Some("Desde 1998".to_owned()),
            description: None,
            image: ImageSource::Missing,
            link: LinkTarget::Custom("/about".to_owned()),
            sort_order: 2,
            is_active: false,
            created_at: Utc::now(),
        };

        let form = FeaturedItemForm::from(&item);
        assert_eq!(form.link_kind, "custom");
        assert_eq!(form.link_url, "/about");
        assert_eq!(form.is_active, None);

        let input = form.validate().unwrap();
        assert_eq!(input.link, item.link);
        assert_eq!(input.subtitle, item.subtitle);
    }

    #[test]
    fn test_record_link_needs_selection() {
        let form = FeaturedItemForm {
            title: "Postre del día".to_owned(),
            link_kind: "product".to_owned(),
            ..FeaturedItemForm::default()
        };
        assert!(matches!(form.validate(), Err(FormError::Link(_))));
    }
}
