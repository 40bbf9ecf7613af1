//! Offer form.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use cafe_ancestral_core::{ImageSource, Offer, Price};

use super::{FormError, checkbox, datetime, datetime_local, image, required};

/// Submitted offer form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OfferForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub is_active: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

/// A validated offer ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferInput {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub image: ImageSource,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl OfferForm {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns `FormError` for blank fields, a bad price or dates, or an end
    /// date before the start date.
    pub fn validate(&self) -> Result<OfferInput, FormError> {
        let start_date = datetime(&self.start_date, "inicio")?;
        let end_date = datetime(&self.end_date, "fin")?;
        if end_date < start_date {
            return Err(FormError::EndBeforeStart);
        }

        Ok(OfferInput {
            title: required(&self.title, "título")?,
            description: required(&self.description, "descripción")?,
            price: Price::parse(&required(&self.price, "precio")?)?,
            image: image(&self.image_url),
            is_active: checkbox(self.is_active.as_deref()),
            start_date,
            end_date,
        })
    }
}

impl From<&Offer> for OfferForm {
    fn from(offer: &Offer) -> Self {
        Self {
            title: offer.title.clone(),
            description: offer.description.clone(),
            price: offer.price.amount().to_string(),
            image_url: offer.image.url().unwrap_or_default().to_owned(),
            is_active: offer.is_active.then(|| "on".to_owned()),
            start_date: datetime_local(&offer.start_date),
            end_date: datetime_local(&offer.end_date),
        }
    }
}
