//! Font archive download proxy.
//!
//! Archives live on the asset host; the site proxies them so the browser
//! gets a same-origin attachment response.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, Response};
use std::time::Duration;

use crate::utils::{ApiError, ApiResult};

static SAFE_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _.\-()]*\.(zip|ttf|otf|woff2?)$").expect("valid regex")
});

pub struct FontDownloadService {
    http_client: Client,
    download_base_url: String,
}

impl FontDownloadService {
    pub fn new(download_base_url: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            download_base_url: download_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reject missing names and anything that could leave the font folder.
    pub fn validate_filename(filename: Option<&str>) -> ApiResult<&str> {
        let filename = filename.map(str::trim).unwrap_or_default();
        if filename.is_empty() {
            return Err(ApiError::MissingParameter("filename".to_string()));
        }
        if filename.contains("..") || !SAFE_FILENAME.is_match(filename) {
            return Err(ApiError::invalid_data(format!("Invalid font filename: {}", filename)));
        }
        Ok(filename)
    }

    pub fn upstream_url(&self, filename: &str) -> String {
        format!("{}/{}", self.download_base_url, urlencoding::encode(filename))
    }

    /// Start the upstream request; the caller streams the body.
    pub async fn open(&self, filename: &str) -> ApiResult<Response> {
        let url = self.upstream_url(filename);
        tracing::debug!("Proxying font download {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Font download request for {} failed: {}", filename, e);
            ApiError::upstream_failed(format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Font host answered {} for {}", status, filename);
            return Err(ApiError::upstream_failed(format!("HTTP status: {}", status)));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename() {
        assert_eq!(
            FontDownloadService::validate_filename(Some("Amiri.zip")).unwrap(),
            "Amiri.zip"
        );
        assert_eq!(
            FontDownloadService::validate_filename(Some(" Reem Kufi (Bold).ttf ")).unwrap(),
            "Reem Kufi (Bold).ttf"
        );
        assert!(matches!(
            FontDownloadService::validate_filename(None),
            Err(ApiError::MissingParameter(_))
        ));
        assert!(matches!(
            FontDownloadService::validate_filename(Some("  ")),
            Err(ApiError::MissingParameter(_))
        ));
        assert!(FontDownloadService::validate_filename(Some("../secret.zip")).is_err());
        assert!(FontDownloadService::validate_filename(Some("a/b.zip")).is_err());
        assert!(FontDownloadService::validate_filename(Some("run.sh")).is_err());
    }

    #[test]
    fn test_upstream_url_encodes_name() {
        let service = FontDownloadService::new("https://cdn.example.com/downloads/");
        assert_eq!(
            service.upstream_url("Reem Kufi.zip"),
            "https://cdn.example.com/downloads/Reem%20Kufi.zip"
        );
    }
}
