use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, header::{CONTENT_TYPE, HOST}},
    response::IntoResponse,
};

use crate::AppState;
use crate::handlers::pages::SINGLE_LOCALE_PAGES;
use crate::models::Locale;
use crate::services::LocaleRouter;
use crate::utils::{HostClass, MULTILINGUAL_PATHS, classify_host};

pub async fn robots(State(state): State<Arc<AppState>>, headers: HeaderMap) -> String {
    let host = headers.get(HOST).and_then(|v| v.to_str().ok()).unwrap_or_default();
    if classify_host(host) == HostClass::Staging {
        return "User-agent: *\nDisallow: /\n".to_string();
    }

    format!("User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n", state.site_origin())
}

pub async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let xml = build_sitemap(&state.site_origin(), &chrono::Utc::now().format("%Y-%m-%d").to_string());
    ([(CONTENT_TYPE, "application/xml; charset=utf-8")], xml)
}

/// Every page once per locale it is served in, with hreflang alternates
/// for the multilingual ones.
pub fn build_sitemap(origin: &str, lastmod: &str) -> String {
    let router = LocaleRouter::with_default();
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );

    for path in MULTILINGUAL_PATHS {
        let mut alternates = String::new();
        for locale in Locale::ALL {
            alternates.push_str(&format!(
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}{}\"/>\n",
                locale.code(),
                origin,
                router.localized_path(*locale, path)
            ));
        }
        alternates.push_str(&format!(
            "    <xhtml:link rel=\"alternate\" hreflang=\"x-default\" href=\"{}{}\"/>\n",
            origin, path
        ));

        for locale in Locale::ALL {
            xml.push_str(&format!(
                "  <url>\n    <loc>{}{}</loc>\n    <lastmod>{}</lastmod>\n{}  </url>\n",
                origin,
                router.localized_path(*locale, path),
                lastmod,
                alternates
            ));
        }
    }

    for path in SINGLE_LOCALE_PAGES {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}{}</loc>\n    <lastmod>{}</lastmod>\n  </url>\n",
            origin, path, lastmod
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}
