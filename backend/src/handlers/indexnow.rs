use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::AppState;
use crate::models::{IndexNowRequest, IndexNowSummary};
use crate::utils::{ApiError, ApiResult};

/// Submit site URLs to IndexNow search engines
#[utoipa::path(
    post,
    path = "/api/indexnow",
    request_body = IndexNowRequest,
    responses(
        (status = 200, description = "Per-engine submission summary", body = IndexNowSummary),
        (status = 400, description = "No submittable URLs"),
    ),
    tag = "SEO"
)]
pub async fn submit_urls(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IndexNowRequest>,
) -> ApiResult<Json<IndexNowSummary>> {
    payload.validate()?;
    tracing::debug!("IndexNow request with {} URLs", payload.urls.len());

    let summary = state.indexnow_service.submit(&payload).await?;
    let accepted = summary.results.iter().filter(|r| r.success).count();
    tracing::info!(
        "IndexNow: {} URLs, {}/{} engines accepted",
        summary.submitted.len(),
        accepted,
        summary.results.len()
    );
    Ok(Json(summary))
}

/// Key verification file at `/indexnow/{key}.txt`
pub async fn key_file(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> ApiResult<String> {
    let key = state.indexnow_service.key();
    let requested = file.strip_suffix(".txt");

    if !state.config.indexnow.enabled || key.is_empty() || requested != Some(key) {
        return Err(ApiError::not_found(file));
    }
    Ok(key.to_string())
}
