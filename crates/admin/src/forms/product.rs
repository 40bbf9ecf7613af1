//! Product form.

use serde::Deserialize;

use cafe_ancestral_core::{CategoryId, ImageSource, Price, Product};

use super::{FormError, checkbox, image, optional, required};

/// Submitted product form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub ingredients: String,
    pub allergens: String,
    pub is_available: Option<String>,
}

/// A validated product ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: ImageSource,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub is_available: bool,
}

impl ProductForm {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns `FormError` for a missing category, blank name or description,
    /// or a price that is not a non-negative decimal.
    pub fn validate(&self) -> Result<ProductInput, FormError> {
        let category_id = self
            .category_id
            .trim()
            .parse()
            .map_err(|_| FormError::Category)?;

        Ok(ProductInput {
            category_id,
            name: required(&self.name, "nombre")?,
            description: required(&self.description, "descripción")?,
            price: Price::parse(&required(&self.price, "precio")?)?,
            image: image(&self.image_url),
            ingredients: optional(&self.ingredients),
            allergens: optional(&self.allergens),
            is_available: checkbox(self.is_available.as_deref()),
        })
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            category_id: product.category_id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount().to_string(),
            image_url: product.image.url().unwrap_or_default().to_owned(),
            ingredients: product.ingredients.clone().unwrap_or_default(),
            allergens: product.allergens.clone().unwrap_or_default(),
            is_available: product.is_available.then(|| "on".to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn espresso() -> ProductForm {
        ProductForm {
            category_id: Uuid::from_u128(1).to_string(),
            name: "Espresso Doble".to_owned(),
            description: "Intenso y aromático, la base de todo buen café.".to_owned(),
            price: "45".to_owned(),
            image_url: String::new(),
            ingredients: "  ".to_owned(),
            allergens: String::new(),
            is_available: Some("on".to_owned()),
        }
    }

    #[test]
    fn test_valid_product() {
        let input = espresso().validate().unwrap();
        assert_eq!(input.price, Price::from_units(45));
        assert_eq!(input.image, ImageSource::Missing);
        assert_eq!(input.ingredients, None);
        assert!(input.is_available);
    }

    #[test]
    fn test_unchecked_availability() {
        let mut form = espresso();
        form.is_available = None;
        assert!(!form.validate().unwrap().is_available);
    }

    #[test]
    fn test_bad_price() {
        let mut form = espresso();
        form.price = "-5".to_owned();
        assert!(matches!(form.validate(), Err(FormError::Price(_))));

        form.price = "gratis".to_owned();
        assert!(matches!(form.validate(), Err(FormError::Price(_))));

        form.price = String::new();
        assert!(matches!(form.validate(), Err(FormError::Required("precio"))));
    }

    #[test]
    fn test_missing_category() {
        let mut form = espresso();
        form.category_id = String::new();
        assert!(matches!(form.validate(), Err(FormError::Category)));
    }
}
