//! Locale resolution and routing middleware
//!
//! Wraps the whole router so it can rewrite `/{locale}/…` URIs before route
//! matching. Per request:
//! 1. Staging hosts get `X-Robots-Tag` and nothing else
//! 2. Single-locale paths pass straight through
//! 3. A valid `prompt-language-choice` cookie short-circuits negotiation
//! 4. Otherwise a locale is suggested from geo / language headers and
//!    remembered in the cookie

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderName, HeaderValue, Uri,
        header::{ACCEPT_LANGUAGE, HOST, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{CacheSource, Locale, RequestRoutingDecision};
use crate::services::locale_router::{LocaleRouter, RouteAction};
use crate::utils::{
    HostClass, LOCALE_COOKIE_NAME, classify_host, classify_path, locale_cookie, read_cookie,
    suggest_locale,
};

pub const SUGGESTED_LOCALE_HEADER: HeaderName = HeaderName::from_static("x-suggested-locale");
pub const COUNTRY_HEADER: HeaderName = HeaderName::from_static("cf-ipcountry");
pub const ROBOTS_TAG_HEADER: HeaderName = HeaderName::from_static("x-robots-tag");

pub async fn locale_routing_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    if classify_host(request_host(&req).unwrap_or_default()) == HostClass::Staging {
        tracing::debug!("Staging host, skipping locale routing for {}", req.uri().path());
        let mut response = next.run(req).await;
        response
            .headers_mut()
            .insert(ROBOTS_TAG_HEADER, HeaderValue::from_static("noindex, nofollow"));
        return response;
    }

    if !classify_path(req.uri().path()).is_multilingual() {
        return next.run(req).await;
    }

    let cookie_locale =
        read_cookie(req.headers(), LOCALE_COOKIE_NAME).and_then(Locale::from_code);

    let (suggested, cache_source, unprefixed) = match cookie_locale {
        Some(locale) => (locale, CacheSource::Cookie, locale),
        None => {
            let headers = req.headers();
            let suggested = suggest_locale(
                header_str(headers, &COUNTRY_HEADER),
                header_str(headers, &ACCEPT_LANGUAGE),
            );
            (suggested, CacheSource::Computed, Locale::DEFAULT)
        },
    };

    let router = LocaleRouter::new(Locale::ALL, unprefixed);
    let action = router.route(req.uri().path(), req.uri().query());
    tracing::debug!(
        "Locale routing {} -> {:?} (suggested={}, source={:?})",
        req.uri().path(),
        action,
        suggested,
        cache_source
    );

    let mut response = match action {
        RouteAction::Redirect { location } => Redirect::temporary(&location).into_response(),
        RouteAction::Rewrite { locale, path } => {
            rewrite_path(&mut req, &path);
            req.extensions_mut().insert(RequestRoutingDecision {
                participates_in_locale_routing: true,
                resolved_locale: locale,
                suggested_locale: suggested,
                unprefixed_locale: unprefixed,
                cache_source,
            });
            next.run(req).await
        },
    };

    let headers = response.headers_mut();
    headers.insert(SUGGESTED_LOCALE_HEADER, HeaderValue::from_static(suggested.code()));

    if cache_source == CacheSource::Computed {
        let cookie = locale_cookie(suggested.code(), state.config.site.environment.is_production());
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            },
            Err(e) => tracing::warn!("Cannot encode locale cookie '{}': {}", cookie, e),
        }
    }

    response
}

fn request_host(req: &Request) -> Option<&str> {
    req.headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().host())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn rewrite_path(req: &mut Request, path: &str) {
    if req.uri().path() == path {
        return;
    }

    let path_and_query = match req.uri().query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = req.uri().clone().into_parts();
    match path_and_query.parse() {
        Ok(pq) => {
            parts.path_and_query = Some(pq);
            match Uri::from_parts(parts) {
                Ok(uri) => *req.uri_mut() = uri,
                Err(e) => tracing::warn!("Cannot rewrite URI to {}: {}", path_and_query, e),
            }
        },
        Err(e) => tracing::warn!("Cannot rewrite URI to {}: {}", path_and_query, e),
    }
}
