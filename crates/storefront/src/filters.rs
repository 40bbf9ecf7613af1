//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Datelike, Utc};

/// Spanish month names, January first.
const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(Utc::now().year())
}

/// Formats a timestamp as a long Spanish date, e.g. "5 de marzo de 2025".
#[must_use]
pub fn long_date(value: &DateTime<Utc>) -> String {
    let month = usize::try_from(value.month0())
        .ok()
        .and_then(|i| MONTHS.get(i))
        .copied()
        .unwrap_or_default();
    format!("{} de {month} de {}", value.day(), value.year())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_long_date() {
        let date = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).single();
        assert_eq!(
            date.map(|d| long_date(&d)).as_deref(),
            Some("5 de marzo de 2025")
        );
    }
}
