//! Sample menu for a fresh database.
//!
//! Inserts five categories and three products through the admin
//! repositories. Does nothing if any category already exists.

use cafe_ancestral_admin::db::{CategoryRepository, ProductRepository, RepositoryError};
use cafe_ancestral_admin::forms::{CategoryInput, ProductInput};
use cafe_ancestral_core::{CategoryKind, ImageSource, Price, Slug, SlugError};

use super::{CommandError, connect};

/// Errors from `ca-cli seed`.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid sample slug: {0}")]
    Slug(#[from] SlugError),

    #[error("Sample product refers to unknown category: {0}")]
    UnknownCategory(&'static str),
}

struct SampleCategory {
    name: &'static str,
    kind: CategoryKind,
}

struct SampleProduct {
    category: &'static str,
    name: &'static str,
    description: &'static str,
    price: u32,
    image_url: &'static str,
}

const CATEGORIES: [SampleCategory; 5] = [
    SampleCategory { name: "Café Caliente", kind: CategoryKind::Drink },
    SampleCategory { name: "Bebidas Frías", kind: CategoryKind::Drink },
    SampleCategory { name: "Pizzas", kind: CategoryKind::Food },
    SampleCategory { name: "Entremeses", kind: CategoryKind::Food },
    SampleCategory { name: "Postres", kind: CategoryKind::Food },
];

const PRODUCTS: [SampleProduct; 3] = [
    SampleProduct {
        category: "cafe-caliente",
        name: "Espresso Doble",
        description: "Intenso y aromático, la base de todo buen café.",
        price: 45,
        image_url: "https://images.unsplash.com/photo-1510591509098-f4fdc6d0ff04?q=80&w=2070&auto=format&fit=crop",
    },
    SampleProduct {
        category: "pizzas",
        name: "Pizza Margarita",
        description: "Clásica italiana con salsa de tomate casera, mozzarella fresca y albahaca.",
        price: 180,
        image_url: "https://images.unsplash.com/photo-1574071318508-1cdbab80d002?q=80&w=2069&auto=format&fit=crop",
    },
    SampleProduct {
        category: "bebidas-frias",
        name: "Cold Brew",
        description: "Macerado en frío por 18 horas, suave y refrescante.",
        price: 65,
        image_url: "https://images.unsplash.com/photo-1517701550927-30cf4ba1dba5?q=80&w=1887&auto=format&fit=crop",
    },
];

/// The sample categories, ordered as listed.
fn category_inputs() -> Result<Vec<CategoryInput>, SlugError> {
    CATEGORIES
        .iter()
        .zip(1..)
        .map(|(sample, sort_order)| {
            Ok(CategoryInput {
                name: sample.name.to_owned(),
                slug: Slug::from_name(sample.name)?,
                kind: sample.kind,
                sort_order,
            })
        })
        .collect()
}

/// Seed the sample menu.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    let pool = connect().await?;
    let categories = CategoryRepository::new(&pool);

    let existing = categories.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Categories already present, skipping seed");
        return Ok(());
    }

    let mut created = Vec::with_capacity(CATEGORIES.len());
    for input in category_inputs()? {
        created.push(categories.create(&input).await?);
    }
    tracing::info!(count = created.len(), "Categories created");

    let products = ProductRepository::new(&pool);
    for sample in &PRODUCTS {
        let category = created
            .iter()
            .find(|c| c.slug.as_str() == sample.category)
            .ok_or(SeedError::UnknownCategory(sample.category))?;

        products
            .create(&ProductInput {
                category_id: category.id,
                name: sample.name.to_owned(),
                description: sample.description.to_owned(),
                price: Price::from_units(sample.price),
                image: ImageSource::from_optional(Some(sample.image_url)),
                ingredients: None,
                allergens: None,
                is_available: true,
            })
            .await?;
    }
    tracing::info!(count = PRODUCTS.len(), "Products created");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sample_product_has_a_category() {
        let categories = category_inputs().unwrap();
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(
            slugs,
            ["cafe-caliente", "bebidas-frias", "pizzas", "entremeses", "postres"]
        );

        for product in &PRODUCTS {
            assert!(slugs.contains(&product.category), "{}", product.name);
        }
    }

    #[test]
    fn test_categories_sorted_from_one() {
        let orders: Vec<i32> = category_inputs()
            .unwrap()
            .iter()
            .map(|c| c.sort_order)
            .collect();
        assert_eq!(orders, [1, 2, 3, 4, 5]);
    }
}
