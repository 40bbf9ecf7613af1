//! Category form.

use serde::Deserialize;

use cafe_ancestral_core::{Category, CategoryKind, Slug};

use super::{FormError, required, sort_order};

/// Submitted category form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
    /// Left blank to derive the slug from the name.
    pub slug: String,
    pub kind: String,
    pub sort_order: String,
}

/// A validated category ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub slug: Slug,
    pub kind: CategoryKind,
    pub sort_order: i32,
}

impl CategoryForm {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns `FormError` if the name is blank, no slug can be derived, the
    /// kind is unknown or the sort order is not an integer.
    pub fn validate(&self) -> Result<CategoryInput, FormError> {
        let name = required(&self.name, "nombre")?;
        let slug = if self.slug.trim().is_empty() {
            Slug::from_name(&name)?
        } else {
            Slug::parse(&self.slug)?
        };

        Ok(CategoryInput {
            slug,
            kind: self.kind.trim().parse()?,
            sort_order: sort_order(&self.sort_order)?,
            name,
        })
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.to_string(),
            kind: category.kind.as_str().to_owned(),
            sort_order: category.sort_order.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, slug: &str) -> CategoryForm {
        CategoryForm {
            name: name.to_owned(),
            slug: slug.to_owned(),
            kind: "drink".to_owned(),
            sort_order: "1".to_owned(),
        }
    }

    #[test]
    fn test_blank_slug_is_derived_from_name() {
        let input = form("Café Caliente", "").validate().unwrap();
        assert_eq!(input.slug.as_str(), "cafe-caliente");
        assert_eq!(input.kind, CategoryKind::Drink);
        assert_eq!(input.sort_order, 1);
    }

    #[test]
    fn test_explicit_slug_is_normalized() {
        let input = form("Café Caliente", "Calientes Ya").validate().unwrap();
        assert_eq!(input.slug.as_str(), "calientes-ya");
    }

    #[test]
    fn test_name_without_letters_is_rejected() {
        assert!(matches!(
            form("¡¿?!", "").validate(),
            Err(FormError::Slug(_))
        ));
        assert!(matches!(
            form("  ", "").validate(),
            Err(FormError::Required("nombre"))
        ));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let mut form = form("Postres", "");
        form.kind = "dessert".to_owned();
        assert!(matches!(form.validate(), Err(FormError::CategoryKind(_))));
    }
}
