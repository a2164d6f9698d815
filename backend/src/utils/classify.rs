//! Request classification used before any locale work is done.
//!
//! Pure functions over plain strings so the routing middleware stays a thin
//! adapter over HTTP types.

use crate::models::Locale;

/// Paths served in every supported locale. Everything else is single-locale.
pub const MULTILINGUAL_PATHS: &[&str] = &["/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostClass {
    Production,
    /// Non-production deployment that must not be indexed.
    Staging,
}

/// Classify a request host. Matches `staging-*` and `*staging.*`.
pub fn classify_host(host: &str) -> HostClass {
    let host = host.trim().to_ascii_lowercase();
    if host.starts_with("staging-") || host.contains("staging.") {
        HostClass::Staging
    } else {
        HostClass::Production
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Served in every locale. `prefix` is the locale segment, if present.
    Multilingual { prefix: Option<Locale>, base: &'static str },
    SingleLocale,
}

impl PathClass {
    pub fn is_multilingual(&self) -> bool {
        matches!(self, PathClass::Multilingual { .. })
    }
}

/// Classify a request path by looking at its first segment only.
pub fn classify_path(path: &str) -> PathClass {
    let (first, rest) = split_first_segment(path);

    match Locale::from_code(first) {
        Some(locale) => match multilingual_base(rest) {
            Some(base) => PathClass::Multilingual { prefix: Some(locale), base },
            None => PathClass::SingleLocale,
        },
        None => match multilingual_base(path) {
            Some(base) => PathClass::Multilingual { prefix: None, base },
            None => PathClass::SingleLocale,
        },
    }
}

/// Split `/seg/rest` into `("seg", "/rest")`. The remainder is `/` when empty.
pub(crate) fn split_first_segment(path: &str) -> (&str, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.find('/') {
        Some(idx) => {
            let rest = &trimmed[idx..];
            (&trimmed[..idx], if rest.is_empty() { "/" } else { rest })
        },
        None => (trimmed, "/"),
    }
}

fn multilingual_base(path: &str) -> Option<&'static str> {
    let path = if path.is_empty() { "/" } else { path };
    MULTILINGUAL_PATHS.iter().copied().find(|p| *p == path)
}
