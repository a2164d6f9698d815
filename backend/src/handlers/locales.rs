use axum::Json;

use crate::models::{Locale, LocaleInfo};

/// List supported locales
#[utoipa::path(
    get,
    path = "/api/locales",
    responses(
        (status = 200, description = "Supported locales", body = Vec<LocaleInfo>)
    ),
    tag = "Locales"
)]
pub async fn list_locales() -> Json<Vec<LocaleInfo>> {
    Json(Locale::ALL.iter().copied().map(LocaleInfo::from).collect())
}
