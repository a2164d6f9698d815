use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::font_cache::FontSource;
use crate::utils::{ApiError, ApiResult};

/// Fonts mirrored from the asset host into a local directory.
///
/// A font is "available" once its file exists in `cache_dir`; the same
/// directory is served under `/fonts`.
pub struct CdnFontSource {
    http_client: Client,
    asset_base_url: String,
    cache_dir: PathBuf,
}

impl CdnFontSource {
    pub fn new(asset_base_url: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            asset_base_url: asset_base_url.into().trim_end_matches('/').to_string(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn font_url(&self, key: &str) -> String {
        format!("{}/fonts/{}", self.asset_base_url, urlencoding::encode(key))
    }
}

#[async_trait]
impl FontSource for CdnFontSource {
    async fn is_available(&self, key: &str) -> bool {
        tokio::fs::try_exists(self.cache_dir.join(key)).await.unwrap_or(false)
    }

    async fn fetch(&self, key: &str) -> ApiResult<()> {
        let url = self.font_url(key);
        tracing::debug!("Downloading font from {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to reach font host for {}: {}", key, e);
            ApiError::upstream_failed(format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(ApiError::upstream_failed(format!(
                "Font host returned {} for {}",
                response.status(),
                key
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            ApiError::upstream_failed(format!("Failed to read font body: {}", e))
        })?;

        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| ApiError::internal_error(format!("Cannot create font cache: {}", e)))?;

        // Write under a temporary name so a half-written file never counts
        // as available.
        let target = self.cache_dir.join(key);
        let partial = self.cache_dir.join(format!(".{}.part", key));
        tokio::fs::write(&partial, &bytes)
            .await
            .map_err(|e| ApiError::internal_error(format!("Cannot write font {}: {}", key, e)))?;
        tokio::fs::rename(&partial, &target)
            .await
            .map_err(|e| ApiError::internal_error(format!("Cannot store font {}: {}", key, e)))?;

        tracing::info!("Cached font {} ({} bytes)", key, bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_writes_into_cache_dir() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fonts/Amiri-Regular.ttf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ttf-bytes".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let source = CdnFontSource::new(server.uri(), dir.path());

        assert!(!source.is_available("Amiri-Regular.ttf").await);
        source.fetch("Amiri-Regular.ttf").await.unwrap();
        assert!(source.is_available("Amiri-Regular.ttf").await);

        let stored = std::fs::read(dir.path().join("Amiri-Regular.ttf")).unwrap();
        assert_eq!(stored, b"ttf-bytes");
    }

    #[tokio::test]
    async fn test_fetch_reports_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let source = CdnFontSource::new(format!("{}/", server.uri()), dir.path());

        let err = source.fetch("Nope.ttf").await.unwrap_err();
        assert!(matches!(err, ApiError::UpstreamFailed(_)));
        assert!(!source.is_available("Nope.ttf").await);
    }
}
