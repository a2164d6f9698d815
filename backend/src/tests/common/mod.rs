// Common test utilities and helpers

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

use crate::config::{Config, Environment, SearchEngineConfig};
use crate::services::FontSource;
use crate::utils::{ApiError, ApiResult};
use crate::{AppState, build_router};

pub const SITE_URL: &str = "https://arabiccalligraphygenerator.com";

/// Config suitable for tests: development mode, no static files, IndexNow on.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.site.url = SITE_URL.to_string();
    config.site.environment = Environment::Development;
    config.static_config.enabled = false;
    config.fonts.cache_dir = std::env::temp_dir()
        .join("calligraphy-site-test-fonts")
        .to_string_lossy()
        .into_owned();
    config.fonts.load_timeout_ms = 1000;
    config.indexnow.enabled = true;
    config.indexnow.key = "test-key-123".to_string();
    config
}

/// Point IndexNow at the given engine endpoints.
pub fn with_engines(mut config: Config, endpoints: &[(&str, String)]) -> Config {
    config.indexnow.engines = endpoints
        .iter()
        .map(|(name, endpoint)| SearchEngineConfig {
            name: name.to_string(),
            endpoint: endpoint.clone(),
        })
        .collect();
    config
}

/// Font source that never touches the network.
#[derive(Default)]
pub struct StubFontSource {
    pub missing: HashSet<String>,
    pub fetches: AtomicUsize,
}

impl StubFontSource {
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FontSource for StubFontSource {
    async fn is_available(&self, _key: &str) -> bool {
        false
    }

    async fn fetch(&self, key: &str) -> ApiResult<()> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.missing.contains(key) {
            return Err(ApiError::upstream_failed(format!("{} not on font host", key)));
        }
        Ok(())
    }
}

pub fn create_test_app(config: Config) -> Router {
    create_test_app_with_source(config, Arc::new(StubFontSource::default()))
}

pub fn create_test_app_with_source(config: Config, source: Arc<StubFontSource>) -> Router {
    let state = AppState::with_font_source(config, source).expect("Failed to build test state");
    build_router(Arc::new(state))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("Request failed")
}

pub async fn get(app: &Router, uri: &str, headers: &[(&str, &str)]) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::empty()).expect("Failed to build request")).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");
    send(app, request).await
}

pub fn header(response: &Response<Body>, name: &str) -> Option<String> {
    response.headers().get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = body_string(response).await;
    serde_json::from_str(&body).expect("Body is not JSON")
}
