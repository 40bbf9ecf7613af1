//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use cafe_ancestral_core::{Category, FeaturedItem, HeroBanner};

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Milliseconds between hero slides.
pub const HERO_AUTOPLAY_MS: u32 = 6000;

/// A single slide in the hero carousel.
#[derive(Clone)]
pub struct HeroSlide {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub cta_text: String,
    pub href: String,
}

impl HeroSlide {
    fn new(banner: &HeroBanner, categories: &[Category]) -> Self {
        Self {
            title: banner.title.clone(),
            subtitle: banner.subtitle.clone(),
            description: banner.description.clone(),
            image_url: banner.image.display_url().to_string(),
            cta_text: banner.cta_text.clone(),
            href: banner.link.href(categories),
        }
    }
}

/// A featured item card below the carousel.
#[derive(Clone)]
pub struct FeaturedCard {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub href: String,
}

impl FeaturedCard {
    fn new(item: &FeaturedItem, categories: &[Category]) -> Self {
        Self {
            title: item.title.clone(),
            subtitle: item.subtitle.clone(),
            description: item.description.clone(),
            image_url: item.image.display_url().to_string(),
            href: item.link.href(categories),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub slides: Vec<HeroSlide>,
    pub featured: Vec<FeaturedCard>,
    pub autoplay_ms: u32,
}

/// Display the home page.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let catalog = CatalogRepository::new(state.pool());

    let (categories, banners, featured) = tokio::try_join!(
        catalog.categories(),
        catalog.active_hero_banners(),
        catalog.active_featured_items()
    )?;

    Ok(HomeTemplate {
        slides: banners
            .iter()
            .map(|b| HeroSlide::new(b, &categories))
            .collect(),
        featured: featured
            .iter()
            .map(|f| FeaturedCard::new(f, &categories))
            .collect(),
        autoplay_ms: HERO_AUTOPLAY_MS,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cafe_ancestral_core::{HeroBannerId, ImageSource, LinkTarget, ProductId};
    use chrono::Utc;
    use uuid::Uuid;

    fn banner() -> HeroBanner {
        HeroBanner {
            id: HeroBannerId::new(Uuid::from_u128(1)),
            title: "Café de especialidad".to_string(),
            subtitle: Some("Tostado en casa".to_string()),
            description: None,
            image: ImageSource::Uploaded("https://cdn.example.com/hero.jpg".to_string()),
            cta_text: "VER MENÚ".to_string(),
            link: LinkTarget::Product(ProductId::new(Uuid::from_u128(9))),
            sort_order: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_hero_slide_resolves_link() {
        let slide = HeroSlide::new(&banner(), &[]);
        assert_eq!(
            slide.href,
            format!("/menu#{}", ProductId::new(Uuid::from_u128(9)))
        );
        assert_eq!(slide.image_url, "https://cdn.example.com/hero.jpg");
    }

    #[test]
    fn test_home_renders_autoplay_interval() {
        let html = HomeTemplate {
            slides: vec![HeroSlide::new(&banner(), &[])],
            featured: Vec::new(),
            autoplay_ms: HERO_AUTOPLAY_MS,
        }
        .render()
        .unwrap();
        assert!(html.contains("data-autoplay-ms=\"6000\""));
        assert!(html.contains("VER MENÚ"));
    }
}
