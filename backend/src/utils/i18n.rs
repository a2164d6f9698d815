//! Internationalization utilities for the backend
//!
//! Locale negotiation from request headers and task-local storage for the
//! locale used in API error messages.

use std::future::Future;

use crate::models::{Locale, locale_for_country};

tokio::task_local! {
    static CURRENT_LOCALE: Locale;
}

/// Run `fut` with `locale` as the message locale.
pub async fn with_locale<F: Future>(locale: Locale, fut: F) -> F::Output {
    CURRENT_LOCALE.scope(locale, fut).await
}

/// Message locale of the current task, or the default outside a scope.
pub fn get_locale() -> Locale {
    CURRENT_LOCALE.try_with(|l| *l).unwrap_or(Locale::DEFAULT)
}

/// Primary language subtag of the first `Accept-Language` entry.
///
/// Accepts: "ar", "ar-SA", "ar_SA", "ar-SA,en;q=0.8", "AR;q=0.9".
/// Only the first entry is considered, whatever its quality value.
pub fn primary_subtag(header_value: &str) -> Option<String> {
    let first = header_value.split(',').next()?;
    let tag = first.split(';').next()?.trim();
    let primary = tag.split(|c| c == '-' || c == '_').next()?.trim().to_lowercase();

    if primary.is_empty() { None } else { Some(primary) }
}

/// Extract locale from Accept-Language header value
pub fn extract_locale_from_header(header_value: Option<&str>) -> Option<Locale> {
    header_value
        .and_then(primary_subtag)
        .and_then(|tag| Locale::from_code(&tag))
}

/// Suggest a locale for a visitor with no stored preference.
///
/// Precedence: mapped country header, then a supported `Accept-Language`
/// primary subtag, then the default locale.
pub fn suggest_locale(country: Option<&str>, accept_language: Option<&str>) -> Locale {
    if let Some(locale) = country.and_then(locale_for_country) {
        return locale;
    }

    extract_locale_from_header(accept_language).unwrap_or(Locale::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("ar").as_deref(), Some("ar"));
        assert_eq!(primary_subtag("ar-SA").as_deref(), Some("ar"));
        assert_eq!(primary_subtag("ar_SA").as_deref(), Some("ar"));
        assert_eq!(primary_subtag("FR-fr,en;q=0.8").as_deref(), Some("fr"));
        assert_eq!(primary_subtag("bn;q=0.9, en").as_deref(), Some("bn"));
        assert_eq!(primary_subtag(" ur-PK ").as_deref(), Some("ur"));
        assert_eq!(primary_subtag(""), None);
        assert_eq!(primary_subtag(",en"), None);
    }

    #[test]
    fn test_extract_locale_from_header() {
        assert_eq!(extract_locale_from_header(Some("tr-TR,tr;q=0.9")), Some(Locale::Tr));
        assert_eq!(extract_locale_from_header(Some("de-DE,ar;q=0.9")), None);
        assert_eq!(extract_locale_from_header(Some("*")), None);
        assert_eq!(extract_locale_from_header(None), None);
    }

    #[test]
    fn test_country_wins_over_language() {
        assert_eq!(suggest_locale(Some("SA"), Some("fr-FR")), Locale::Ar);
        assert_eq!(suggest_locale(Some("PK"), Some("en-US")), Locale::Ur);
    }

    #[test]
    fn test_language_used_when_country_unmapped() {
        assert_eq!(suggest_locale(Some("DE"), Some("ms-MY,en")), Locale::Ms);
        assert_eq!(suggest_locale(None, Some("id")), Locale::Id);
        assert_eq!(suggest_locale(Some(""), Some("bn-BD")), Locale::Bn);
    }

    #[test]
    fn test_default_when_no_signal() {
        assert_eq!(suggest_locale(None, None), Locale::DEFAULT);
        assert_eq!(suggest_locale(Some("XX"), Some("de-DE")), Locale::DEFAULT);
        assert_eq!(suggest_locale(Some("zz"), Some("")), Locale::DEFAULT);
    }

    #[tokio::test]
    async fn test_task_local_locale() {
        assert_eq!(get_locale(), Locale::DEFAULT);

        let inner = with_locale(Locale::Ar, async { get_locale() }).await;
        assert_eq!(inner, Locale::Ar);

        assert_eq!(get_locale(), Locale::DEFAULT);
    }
}
