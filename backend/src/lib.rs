//! Arabic Calligraphy Generator site backend.
//!
//! Locale-negotiating page routing, font delivery and SEO endpoints.

use std::sync::Arc;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use reqwest::Url;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use config::Config;
use services::{CdnFontSource, FontDownloadService, FontLoadCache, FontSource, IndexNowService};

pub struct AppState {
    pub config: Arc<Config>,
    pub site_url: Url,
    pub font_cache: Arc<FontLoadCache>,
    pub download_service: FontDownloadService,
    pub indexnow_service: IndexNowService,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, anyhow::Error> {
        let source = CdnFontSource::new(&config.fonts.asset_base_url, &config.fonts.cache_dir);
        Self::with_font_source(config, Arc::new(source))
    }

    /// State with a caller-supplied font source.
    pub fn with_font_source(
        config: Config,
        font_source: Arc<dyn FontSource>,
    ) -> Result<Self, anyhow::Error> {
        let site_url = config.site_url()?;
        let font_cache = Arc::new(FontLoadCache::new(font_source, config.font_load_timeout()));
        let download_service = FontDownloadService::new(&config.fonts.download_base_url);
        let indexnow_service = IndexNowService::new(&site_url, &config.indexnow);

        Ok(Self {
            config: Arc::new(config),
            site_url,
            font_cache,
            download_service,
            indexnow_service,
        })
    }

    /// Site origin without a trailing slash.
    pub fn site_origin(&self) -> String {
        self.site_url.as_str().trim_end_matches('/').to_string()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::fonts::download_font,
        handlers::fonts::list_fonts,
        handlers::fonts::load_font,
        handlers::indexnow::submit_urls,
        handlers::locales::list_locales,
    ),
    components(schemas(
        models::FontStatus,
        models::FontLoadResponse,
        models::LoadOutcome,
        models::IndexNowRequest,
        models::IndexNowSummary,
        models::EngineResult,
        models::LocaleInfo,
        models::Locale,
        models::TextDirection,
    )),
    tags(
        (name = "Fonts", description = "Font catalog, loading and downloads"),
        (name = "SEO", description = "Search engine submission"),
        (name = "Locales", description = "Supported languages"),
    )
)]
pub struct ApiDoc;

/// Build the full application.
///
/// Locale routing wraps the inner router as a fallback service so that
/// `/{locale}` prefixes are rewritten before routes are matched.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/locales", get(handlers::locales::list_locales))
        .route("/api/fonts", get(handlers::fonts::list_fonts))
        .route("/api/fonts/:key/load", post(handlers::fonts::load_font))
        .route("/api/download-font", get(handlers::fonts::download_font))
        .route("/api/indexnow", post(handlers::indexnow::submit_urls))
        .layer(CorsLayer::permissive());

    let pages = Router::new()
        .route("/", get(handlers::pages::home))
        .route("/pricing", get(handlers::pages::pricing))
        .route("/robots.txt", get(handlers::seo::robots))
        .route("/sitemap.xml", get(handlers::seo::sitemap))
        .route("/indexnow/:file", get(handlers::indexnow::key_file));

    let mut app = Router::new()
        .merge(pages)
        .merge(api)
        .nest_service("/fonts", ServeDir::new(&state.config.fonts.cache_dir))
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if state.config.static_config.enabled {
        app = app.fallback_service(ServeDir::new(&state.config.static_config.web_root));
    }

    let app = app
        .layer(from_fn(middleware::locale_middleware))
        .with_state(Arc::clone(&state));

    Router::new()
        .fallback_service(app)
        .layer(from_fn_with_state(state, middleware::locale_routing_middleware))
        .layer(TraceLayer::new_for_http())
}
