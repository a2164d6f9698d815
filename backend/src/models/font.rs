use serde::Serialize;
use utoipa::ToSchema;

/// Result of one font load, shared by every caller that waited on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Downloaded from the asset host.
    Fetched,
    /// Present locally before any network request was made.
    AlreadyAvailable,
    /// The caller stopped waiting; the load itself keeps running.
    TimedOut,
    /// The load finished with an error. Recorded so it is not retried.
    Failed(String),
}

impl LoadOutcome {
    /// Loads never fail the caller; anything but a clean load is a warning.
    pub fn warning(&self) -> Option<String> {
        match self {
            LoadOutcome::Fetched | LoadOutcome::AlreadyAvailable => None,
            LoadOutcome::TimedOut => Some("font load timed out, continuing without it".to_string()),
            LoadOutcome::Failed(reason) => Some(format!("font load failed: {}", reason)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FontStatus {
    pub key: String,
    pub loaded: bool,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<LoadOutcome>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FontLoadResponse {
    pub key: String,
    pub outcome: LoadOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
