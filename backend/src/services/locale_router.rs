//! Locale-prefix routing.
//!
//! One locale is served without a prefix (`/`), every other supported locale
//! lives under `/{code}`. A request that spells out the unprefixed locale is
//! redirected to the bare path so each page has one canonical URL per locale.

use crate::models::Locale;
use crate::utils::classify::split_first_segment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Serve `path` (locale prefix removed) rendered in `locale`.
    Rewrite { locale: Locale, path: String },
    /// Send the client to `location` instead.
    Redirect { location: String },
}

#[derive(Debug, Clone, Copy)]
pub struct LocaleRouter {
    locales: &'static [Locale],
    unprefixed: Locale,
}

impl LocaleRouter {
    pub fn new(locales: &'static [Locale], unprefixed: Locale) -> Self {
        Self { locales, unprefixed }
    }

    /// Router for the supported locale set with the default served bare.
    pub fn with_default() -> Self {
        Self::new(Locale::ALL, Locale::DEFAULT)
    }

    pub fn route(&self, path: &str, query: Option<&str>) -> RouteAction {
        let (first, rest) = split_first_segment(path);

        let prefix = Locale::from_code(first).filter(|l| self.locales.contains(l));
        match prefix {
            Some(locale) if locale == self.unprefixed => {
                RouteAction::Redirect { location: with_query(rest, query) }
            },
            Some(locale) => RouteAction::Rewrite { locale, path: rest.to_string() },
            None => RouteAction::Rewrite {
                locale: self.unprefixed,
                path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            },
        }
    }

    /// Public URL path of `path` rendered in `locale`.
    pub fn localized_path(&self, locale: Locale, path: &str) -> String {
        if locale == self.unprefixed {
            return path.to_string();
        }
        if path == "/" {
            format!("/{}", locale.code())
        } else {
            format!("/{}{}", locale.code(), path)
        }
    }
}

fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path.to_string(),
    }
}
