//! URL slugs for menu categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Nothing slug-worthy was left after normalization.
    #[error("slug cannot be empty (from {0:?})")]
    Empty(String),
}

/// A lowercase ASCII slug such as `cafe-caliente`.
///
/// Slugs only contain `a-z`, `0-9` and single hyphens, never leading or
/// trailing ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive a slug from free text.
    ///
    /// Lowercases, strips Latin diacritics (`é` → `e`, `ñ` → `n`),
    /// collapses every run of other characters into one hyphen and trims
    /// hyphens from both ends.
    ///
    /// ```
    /// use cafe_ancestral_core::Slug;
    ///
    /// assert_eq!(Slug::from_name("Café Caliente").unwrap().as_str(), "cafe-caliente");
    /// assert_eq!(Slug::from_name("  Bebidas Frías!! ").unwrap().as_str(), "bebidas-frias");
    /// assert!(Slug::from_name("¡¿?!").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `SlugError::Empty` if nothing alphanumeric remains.
    pub fn from_name(name: &str) -> Result<Self, SlugError> {
        let mut slug = String::with_capacity(name.len());
        let mut pending_hyphen = false;

        for c in name.chars().flat_map(char::to_lowercase).map(fold_diacritic) {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            } else {
                pending_hyphen = true;
            }
        }

        if slug.is_empty() {
            return Err(SlugError::Empty(name.to_owned()));
        }
        Ok(Self(slug))
    }

    /// Accept a slug typed by an admin, normalizing it the same way.
    ///
    /// # Errors
    ///
    /// Returns `SlugError::Empty` if nothing alphanumeric remains.
    pub fn parse(input: &str) -> Result<Self, SlugError> {
        Self::from_name(input)
    }

    /// The slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip the combining mark from a lowercase Latin letter.
const fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn slug(s: &str) -> String {
        Slug::from_name(s).unwrap().as_str().to_owned()
    }

    #[test]
    fn test_menu_category_names() {
        assert_eq!(slug("Café Caliente"), "cafe-caliente");
        assert_eq!(slug("Bebidas Frías"), "bebidas-frias");
        assert_eq!(slug("Pizzas"), "pizzas");
        assert_eq!(slug("Entremeses"), "entremeses");
    }

    #[test]
    fn test_uppercase_accents_fold() {
        assert_eq!(slug("ÑANDÚ AÑEJO"), "nandu-anejo");
    }

    #[test]
    fn test_collapses_and_trims_separators() {
        assert_eq!(slug("--Té   & Tisanas--"), "te-tisanas");
        assert_eq!(slug("Combo #2 (grande)"), "combo-2-grande");
    }

    #[test]
    fn test_empty_after_normalization() {
        assert!(matches!(Slug::from_name("  "), Err(SlugError::Empty(_))));
        assert!(matches!(Slug::from_name("☕"), Err(SlugError::Empty(_))));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let once = Slug::from_name("Postres Caseros").unwrap();
        let twice = Slug::parse(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }
}
