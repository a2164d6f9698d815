use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
    },
    response::Response,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::AppState;
use crate::models::{FontLoadResponse, FontStatus};
use crate::services::FontDownloadService;
use crate::utils::{ApiError, ApiResult};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadQuery {
    /// Archive name on the asset host, e.g. `Amiri.zip`
    pub filename: Option<String>,
}

/// Download a font archive
#[utoipa::path(
    get,
    path = "/api/download-font",
    params(DownloadQuery),
    responses(
        (status = 200, description = "Font archive", content_type = "application/zip"),
        (status = 400, description = "Missing or invalid filename"),
        (status = 500, description = "Font host unavailable"),
    ),
    tag = "Fonts"
)]
pub async fn download_font(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Response> {
    let filename = FontDownloadService::validate_filename(query.filename.as_deref())?;
    tracing::info!("Downloading font archive {}", filename);

    let upstream = state.download_service.open(filename).await?;
    let content_length = upstream.content_length();

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/zip")
        .header(CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename));
    if let Some(len) = content_length {
        builder = builder.header(CONTENT_LENGTH, len);
    }

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| ApiError::internal_error(format!("Failed to build download response: {}", e)))
}

/// List catalog fonts with their load state
#[utoipa::path(
    get,
    path = "/api/fonts",
    responses(
        (status = 200, description = "Font catalog", body = Vec<FontStatus>)
    ),
    tag = "Fonts"
)]
pub async fn list_fonts(State(state): State<Arc<AppState>>) -> Json<Vec<FontStatus>> {
    let fonts = state
        .config
        .fonts
        .catalog
        .iter()
        .map(|key| FontStatus {
            key: key.clone(),
            loaded: state.font_cache.is_loaded(key),
            loading: state.font_cache.is_loading(key),
            outcome: state.font_cache.get(key),
        })
        .collect();
    Json(fonts)
}

/// Load a catalog font into the local font mirror
#[utoipa::path(
    post,
    path = "/api/fonts/{key}/load",
    params(("key" = String, Path, description = "Font file name from the catalog")),
    responses(
        (status = 200, description = "Load finished or timed out", body = FontLoadResponse),
        (status = 404, description = "Font not in catalog"),
    ),
    tag = "Fonts"
)]
pub async fn load_font(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> ApiResult<Json<FontLoadResponse>> {
    if !state.config.fonts.catalog.iter().any(|k| *k == key) {
        return Err(ApiError::FontNotFound(key));
    }

    let outcome = state.font_cache.load(&key).await;
    let warning = outcome.warning();
    Ok(Json(FontLoadResponse { key, outcome, warning }))
}
