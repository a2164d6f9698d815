//! Message locale middleware
//!
//! Picks the locale for API error messages and scopes it to the request's
//! task: the routed page locale when locale routing ran, otherwise the
//! Accept-Language header.

use axum::{
    extract::Request,
    http::header::ACCEPT_LANGUAGE,
    middleware::Next,
    response::Response,
};

use crate::models::{Locale, RequestRoutingDecision};
use crate::utils::{extract_locale_from_header, with_locale};

/// Middleware to scope the message locale for the current request
pub async fn locale_middleware(req: Request, next: Next) -> Response {
    let locale = req
        .extensions()
        .get::<RequestRoutingDecision>()
        .map(|decision| decision.resolved_locale)
        .or_else(|| {
            let header = req.headers().get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());
            extract_locale_from_header(header)
        })
        .unwrap_or(Locale::DEFAULT);

    with_locale(locale, next.run(req)).await
}
