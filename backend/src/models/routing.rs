use serde::Serialize;

use super::locale::Locale;

/// Where the suggested locale of a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    /// A valid `prompt-language-choice` cookie.
    Cookie,
    /// Geo header, `Accept-Language`, or the default.
    Computed,
}

/// Per-request outcome of locale negotiation.
///
/// Inserted into request extensions for the rendering handlers. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestRoutingDecision {
    pub participates_in_locale_routing: bool,
    /// Locale the page renders in (derived from the path).
    pub resolved_locale: Locale,
    /// Locale offered to the visitor by the language prompt.
    pub suggested_locale: Locale,
    /// Locale the request's router serves without a `/{code}` prefix.
    pub unprefixed_locale: Locale,
    pub cache_source: CacheSource,
}

impl RequestRoutingDecision {
    /// Decision seen by handlers on paths that skip locale routing.
    pub fn single_locale() -> Self {
        Self {
            participates_in_locale_routing: false,
            resolved_locale: Locale::DEFAULT,
            suggested_locale: Locale::DEFAULT,
            unprefixed_locale: Locale::DEFAULT,
            cache_source: CacheSource::Computed,
        }
    }

    /// Whether the rendered page should offer a switch to another language.
    pub fn offers_switch(&self) -> bool {
        self.participates_in_locale_routing && self.suggested_locale != self.resolved_locale
    }
}
