//! IndexNow submission.
//!
//! Only absolute URLs on the site's own host are forwarded, at most
//! [`MAX_BATCH`] per call. Engine failures are reported per engine and never
//! fail the whole submission.

use futures::future::join_all;
use reqwest::{Client, Url};
use std::collections::HashSet;
use std::time::Duration;

use crate::config::{IndexNowConfig, SearchEngineConfig};
use crate::models::{EngineResult, IndexNowPayload, IndexNowRequest, IndexNowSummary};
use crate::utils::{ApiError, ApiResult};

pub const MAX_BATCH: usize = 10;

pub struct IndexNowService {
    http_client: Client,
    site_host: String,
    key: String,
    key_location: String,
    engines: Vec<SearchEngineConfig>,
    enabled: bool,
}

impl IndexNowService {
    pub fn new(site_url: &Url, config: &IndexNowConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        let site_host = site_url.host_str().unwrap_or_default().to_ascii_lowercase();
        let key_location = format!(
            "{}/indexnow/{}.txt",
            site_url.as_str().trim_end_matches('/'),
            config.key
        );

        Self {
            http_client,
            site_host,
            key: config.key.clone(),
            key_location,
            engines: config.engines.clone(),
            enabled: config.enabled,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn key_location(&self) -> &str {
        &self.key_location
    }

    /// Same-site absolute http(s) URLs, de-duplicated, capped at [`MAX_BATCH`].
    pub fn filter_urls(&self, urls: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        urls.iter()
            .filter_map(|raw| Url::parse(raw.trim()).ok())
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .filter(|url| {
                url.host_str().map(|h| h.eq_ignore_ascii_case(&self.site_host)).unwrap_or(false)
            })
            .map(String::from)
            .filter(|url| seen.insert(url.clone()))
            .take(MAX_BATCH)
            .collect()
    }

    pub async fn submit(&self, request: &IndexNowRequest) -> ApiResult<IndexNowSummary> {
        if !self.enabled {
            return Err(ApiError::NotConfigured("indexnow".to_string()));
        }

        let urls = self.filter_urls(&request.urls);
        if urls.is_empty() {
            return Err(ApiError::validation_error("no submittable URLs for this site"));
        }

        // Engines share submissions with each other, so the first one is
        // enough unless the caller wants every engine notified directly.
        let engines: &[SearchEngineConfig] = if request.immediate {
            &self.engines
        } else {
            &self.engines[..self.engines.len().min(1)]
        };

        tracing::info!("Submitting {} URLs to {} IndexNow engine(s)", urls.len(), engines.len());

        let payload = IndexNowPayload {
            host: &self.site_host,
            key: &self.key,
            key_location: &self.key_location,
            url_list: &urls,
        };

        let results =
            join_all(engines.iter().map(|engine| self.submit_to(engine, &payload))).await;

        Ok(IndexNowSummary { submitted: urls, results, submitted_at: chrono::Utc::now() })
    }

    async fn submit_to(
        &self,
        engine: &SearchEngineConfig,
        payload: &IndexNowPayload<'_>,
    ) -> EngineResult {
        let response = self
            .http_client
            .post(&engine.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json; charset=utf-8")
            .json(payload)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    tracing::info!("IndexNow submission to {} accepted ({})", engine.name, status);
                } else {
                    tracing::warn!("IndexNow submission to {} rejected ({})", engine.name, status);
                }
                EngineResult {
                    engine: engine.name.clone(),
                    success: status.is_success(),
                    status: Some(status.as_u16()),
                    error: None,
                }
            },
            Err(e) => {
                tracing::warn!("IndexNow submission to {} failed: {}", engine.name, e);
                EngineResult {
                    engine: engine.name.clone(),
                    success: false,
                    status: None,
                    error: Some(e.to_string()),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> IndexNowService {
        let site = Url::parse("https://arabiccalligraphygenerator.com").unwrap();
        let config = IndexNowConfig {
            enabled: true,
            key: "abc123".to_string(),
            engines: vec![SearchEngineConfig {
                name: "indexnow".to_string(),
                endpoint: "https://api.indexnow.org/indexnow".to_string(),
            }],
        };
        IndexNowService::new(&site, &config)
    }

    #[test]
    fn test_key_location() {
        assert_eq!(
            service().key_location(),
            "https://arabiccalligraphygenerator.com/indexnow/abc123.txt"
        );
    }

    #[test]
    fn test_filter_keeps_same_site_absolute_urls() {
        let urls = vec![
            "https://arabiccalligraphygenerator.com/".to_string(),
            "https://arabiccalligraphygenerator.com/ar".to_string(),
            "https://ARABICCALLIGRAPHYGENERATOR.com/pricing".to_string(),
            "https://evil.example.com/".to_string(),
            "/relative".to_string(),
            "ftp://arabiccalligraphygenerator.com/file".to_string(),
            "not a url".to_string(),
        ];

        let kept = service().filter_urls(&urls);
        assert_eq!(
            kept,
            vec![
                "https://arabiccalligraphygenerator.com/".to_string(),
                "https://arabiccalligraphygenerator.com/ar".to_string(),
                "https://arabiccalligraphygenerator.com/pricing".to_string(),
            ]
        );
    }

    #[test]
    fn test_filter_dedupes_and_caps_batch() {
        let mut urls: Vec<String> = (0..15)
            .map(|i| format!("https://arabiccalligraphygenerator.com/p{}", i))
            .collect();
        urls.insert(1, "https://arabiccalligraphygenerator.com/p0".to_string());

        let kept = service().filter_urls(&urls);
        assert_eq!(kept.len(), MAX_BATCH);
        assert_eq!(kept[0], "https://arabiccalligraphygenerator.com/p0");
        assert_eq!(kept[1], "https://arabiccalligraphygenerator.com/p1");
    }
}
