//! Admin form submissions validated into the records the storefront reads.

#![allow(clippy::unwrap_used)]

use cafe_ancestral_admin::forms::{
    BlogPostForm, CategoryForm, FeaturedItemForm, FormError, HeroBannerForm, OfferForm,
    ProductForm,
};
use cafe_ancestral_core::{
    BlogPostId, Category, CategoryId, CategoryKind, FeaturedItem, FeaturedItemId, ImageSource,
    LinkTarget, Price, Slug,
};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

#[test]
fn test_category_slug_follows_the_menu_filter() {
    let input = CategoryForm {
        name: "Bebidas Frías".to_string(),
        kind: "drink".to_string(),
        ..CategoryForm::default()
    }
    .validate()
    .unwrap();

    assert_eq!(input.slug, Slug::parse("bebidas-frias").unwrap());
    assert_eq!(input.kind, CategoryKind::Drink);

    let category = Category {
        id: CategoryId::new(Uuid::from_u128(5)),
        name: input.name,
        slug: input.slug,
        kind: input.kind,
        sort_order: input.sort_order,
        created_at: Utc::now(),
    };
    let link = LinkTarget::Category(category.id);
    assert_eq!(link.href(&[category]), "/menu?category=bebidas-frias");
}

#[test]
fn test_product_without_image_gets_placeholder() {
    let input = ProductForm {
        category_id: Uuid::from_u128(5).to_string(),
        name: "Pan de Elote".to_string(),
        description: "Receta de la abuela".to_string(),
        price: "38.50".to_string(),
        image_url: "   ".to_string(),
        is_available: Some("on".to_string()),
        ..ProductForm::default()
    }
    .validate()
    .unwrap();

    assert_eq!(input.price, Price::parse("38.5").unwrap());
    assert_eq!(input.image, ImageSource::Missing);
    assert_eq!(
        input.image.display_url(),
        cafe_ancestral_core::PLACEHOLDER_IMAGE_URL
    );
    assert!(input.is_available);
}

#[test]
fn test_product_rejects_negative_price() {
    let result = ProductForm {
        category_id: Uuid::from_u128(5).to_string(),
        name: "Error".to_string(),
        description: "Precio inválido".to_string(),
        price: "-10".to_string(),
        ..ProductForm::default()
    }
    .validate();

    assert!(matches!(result, Err(FormError::Price(_))));
}

#[test]
fn test_offer_window_runs_inclusive() {
    let input = OfferForm {
        title: "2x1 en Cold Brew".to_string(),
        description: "Solo los martes".to_string(),
        price: "65".to_string(),
        is_active: Some("on".to_string()),
        start_date: "2025-06-01T00:00".to_string(),
        end_date: "2025-06-30T23:59".to_string(),
        ..OfferForm::default()
    }
    .validate()
    .unwrap();

    assert_eq!(
        input.start_date,
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    );

    let backwards = OfferForm {
        start_date: "2025-06-30".to_string(),
        end_date: "2025-06-01".to_string(),
        ..OfferForm::default()
    };
    assert!(matches!(backwards.validate(), Err(FormError::EndBeforeStart)));
}

#[test]
fn test_blog_post_defaults_publication_time() {
    let now = Utc.with_ymd_and_hms(2025, 2, 14, 10, 0, 0).unwrap();
    let input = BlogPostForm {
        title: "Nuestro origen".to_string(),
        excerpt: "Cómo empezó todo".to_string(),
        content: "# Hola\n\nTexto".to_string(),
        ..BlogPostForm::default()
    }
    .validate(now)
    .unwrap();

    assert_eq!(input.published_at, now);
    assert!(!input.is_published);
}

#[test]
fn test_featured_item_edit_keeps_its_link() {
    let post = BlogPostId::new(Uuid::from_u128(77));
    let item = FeaturedItem {
        id: FeaturedItemId::new(Uuid::from_u128(1)),
        title: "Lee nuestro blog".to_string(),
        subtitle: Some("Historias".to_string()),
        description: None,
        image: ImageSource::Missing,
        link: LinkTarget::BlogPost(post),
        sort_order: 2,
        is_active: true,
        created_at: Utc::now(),
    };

    let input = FeaturedItemForm::from(&item).validate().unwrap();
    assert_eq!(input.link, LinkTarget::BlogPost(post));
    assert_eq!(input.link.href(&[]), format!("/blog/{post}"));
    assert_eq!(input.sort_order, 2);
    assert_eq!(input.subtitle.as_deref(), Some("Historias"));
}

#[test]
fn test_hero_banner_needs_button_text() {
    let form = HeroBannerForm {
        title: "Temporada de pan de muerto".to_string(),
        link_kind: "custom".to_string(),
        link_url: "/menu".to_string(),
        ..HeroBannerForm::default()
    };

    assert!(matches!(form.validate(), Err(FormError::Required(_))));

    let input = HeroBannerForm {
        cta_text: "VER MENÚ".to_string(),
        ..form
    }
    .validate()
    .unwrap();
    assert_eq!(input.link, LinkTarget::Custom("/menu".to_string()));
}
