use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IndexNowRequest {
    #[validate(length(min = 1, message = "at least one URL is required"))]
    pub urls: Vec<String>,
    /// Submit to every configured engine instead of only the first one.
    #[serde(default)]
    pub immediate: bool,
}

/// Body sent to an IndexNow endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexNowPayload<'a> {
    pub host: &'a str,
    pub key: &'a str,
    pub key_location: &'a str,
    pub url_list: &'a [String],
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EngineResult {
    pub engine: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IndexNowSummary {
    pub submitted: Vec<String>,
    pub results: Vec<EngineResult>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
