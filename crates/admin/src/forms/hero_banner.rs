//! Hero banner form.

use serde::Deserialize;

use cafe_ancestral_core::{HeroBanner, ImageSource, LinkTarget};

use super::{FormError, LinkFields, checkbox, image, link_fields, optional, required, sort_order};

/// Submitted hero banner form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeroBannerForm {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub cta_text: String,
    pub link_kind: String,
    pub link_url: String,
    pub link_category: String,
    pub link_product: String,
    pub link_blog: String,
    pub sort_order: String,
    pub is_active: Option<String>,
}

/// A validated hero banner ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroBannerInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: ImageSource,
    pub cta_text: String,
    pub link: LinkTarget,
    pub sort_order: i32,
    pub is_active: bool,
}

impl HeroBannerForm {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns `FormError` for a blank title or button text, a bad link or
    /// sort order.
    pub fn validate(&self) -> Result<HeroBannerInput, FormError> {
        let link = LinkFields {
            kind: &self.link_kind,
            url: &self.link_url,
            category: &self.link_category,
            product: &self.link_product,
            blog: &self.link_blog,
        }
        .validate()?;

        Ok(HeroBannerInput {
            title: required(&self.title, "título")?,
            subtitle: optional(&self.subtitle),
            description: optional(&self.description),
            image: image(&self.image_url),
            cta_text: required(&self.cta_text, "texto del botón")?,
            link,
            sort_order: sort_order(&self.sort_order)?,
            is_active: checkbox(self.is_active.as_deref()),
        })
    }
}

impl From<&HeroBanner> for HeroBannerForm {
    fn from(banner: &HeroBanner) -> Self {
        let [link_kind, link_url, link_category, link_product, link_blog] =
            link_fields(&banner.link);
        Self {
            title: banner.title.clone(),
            subtitle: banner.subtitle.clone().unwrap_or_default(),
            description: banner.description.clone().unwrap_or_default(),
            image_url: banner.image.url().unwrap_or_default().to_owned(),
            cta_text: banner.cta_text.clone(),
            link_kind,
            link_url,
            link_category,
            link_product,
            link_blog,
            sort_order: banner.sort_order.to_string(),
            is_active: banner.is_active.then(|| "on".to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cafe_ancestral_core::BlogPostId;
    use uuid::Uuid;

    fn banner() -> HeroBannerForm {
        HeroBannerForm {
            title: "Temporada de tamales".to_owned(),
            cta_text: "LEER MÁS".to_owned(),
            link_kind: "blog".to_owned(),
            link_blog: Uuid::from_u128(8).to_string(),
            sort_order: "1".to_owned(),
            ..HeroBannerForm::default()
        }
    }

    #[test]
    fn test_blog_link() {
        let input = banner().validate().unwrap();
        assert_eq!(
            input.link,
            LinkTarget::BlogPost(BlogPostId::new(Uuid::from_u128(8)))
        );
        assert_eq!(input.sort_order, 1);
        assert!(!input.is_active);
        assert!(input.image.is_missing());
    }

    #[test]
    fn test_button_text_is_required() {
        let mut form = banner();
        form.cta_text = " ".to_owned();
        assert!(matches!(
            form.validate(),
            Err(FormError::Required("texto del botón"))
        ));
    }

    #[test]
    fn test_sort_order_must_be_integer() {
        let mut form = banner();
        form.sort_order = "1.5".to_owned();
        assert!(matches!(form.validate(), Err(FormError::NotAnInteger(_))));
    }
}
