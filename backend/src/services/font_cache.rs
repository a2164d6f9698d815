//! Font load cache with per-key request coalescing
//!
//! - Each font key is loaded at most once per cache lifetime
//! - Concurrent callers share one in-flight load
//! - Callers wait a bounded time; the load itself is never cancelled
//! - Every finished load is recorded, failures included, so nothing retries

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::Arc;
use std::time::Duration;

use crate::models::LoadOutcome;
use crate::utils::ApiResult;

/// Where font files come from.
#[async_trait]
pub trait FontSource: Send + Sync {
    /// Whether the font can be used without a network request.
    async fn is_available(&self, key: &str) -> bool;

    /// Fetch the font so that later `is_available` calls succeed.
    async fn fetch(&self, key: &str) -> ApiResult<()>;
}

type SharedLoad = Shared<BoxFuture<'static, LoadOutcome>>;

pub struct FontLoadCache {
    source: Arc<dyn FontSource>,
    timeout: Duration,
    /// Finished loads by key.
    outcomes: Arc<DashMap<String, LoadOutcome>>,
    /// Loads currently running by key.
    in_flight: Arc<DashMap<String, SharedLoad>>,
}

impl FontLoadCache {
    pub fn new(source: Arc<dyn FontSource>, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            outcomes: Arc::new(DashMap::new()),
            in_flight: Arc::new(DashMap::new()),
        }
    }

    pub fn is_loaded(&self, key: &str) -> bool {
        self.outcomes.contains_key(key)
    }

    pub fn is_loading(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }

    /// Recorded outcome of a finished load.
    pub fn get(&self, key: &str) -> Option<LoadOutcome> {
        self.outcomes.get(key).map(|o| o.value().clone())
    }

    /// Load `key`, joining an in-flight load if there is one.
    ///
    /// Never fails: problems come back as `TimedOut` or `Failed`.
    pub async fn load(&self, key: &str) -> LoadOutcome {
        if let Some(outcome) = self.get(key) {
            return outcome;
        }

        let pending = match self.in_flight.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                tracing::debug!("Joining in-flight load for font {}", key);
                entry.get().clone()
            },
            Entry::Vacant(entry) => {
                // The load may have finished between the first check and
                // taking the entry; outcomes are written before in_flight
                // is cleared, so this second check closes the gap.
                if let Some(outcome) = self.get(key) {
                    return outcome;
                }
                let pending = self.start_load(key.to_string());
                entry.insert(pending.clone());
                pending
            },
        };

        match tokio::time::timeout(self.timeout, pending).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    "Font {} not loaded within {}ms, continuing without waiting",
                    key,
                    self.timeout.as_millis()
                );
                LoadOutcome::TimedOut
            },
        }
    }

    fn start_load(&self, key: String) -> SharedLoad {
        let source = Arc::clone(&self.source);
        let outcomes = Arc::clone(&self.outcomes);
        let in_flight = Arc::clone(&self.in_flight);

        let handle = tokio::spawn(async move {
            let outcome = if source.is_available(&key).await {
                tracing::debug!("Font {} already available locally", key);
                LoadOutcome::AlreadyAvailable
            } else {
                tracing::info!("Fetching font {}", key);
                match source.fetch(&key).await {
                    Ok(()) => LoadOutcome::Fetched,
                    Err(e) => {
                        tracing::warn!("Failed to load font {}: {}", key, e);
                        LoadOutcome::Failed(e.to_string())
                    },
                }
            };

            outcomes.insert(key.clone(), outcome.clone());
            in_flight.remove(&key);
            outcome
        });

        handle
            .map(|joined| joined.unwrap_or_else(|e| LoadOutcome::Failed(e.to_string())))
            .boxed()
            .shared()
    }
}
