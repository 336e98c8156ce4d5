use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use baltway_core::settings::SiteSettings;

use crate::error::AppError;
use crate::state::AppState;

/// The contact phone is shown site-wide, so reads are public; only the
/// replacement goes through the admin area.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/v1/settings", get(get_settings))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/v1/admin/settings",
        get(get_settings).put(replace_settings),
    )
}

/// GET /v1/settings
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let settings = state.settings.get().await?;
    Ok(Json(json!({ "settings": settings })))
}

/// PUT /v1/admin/settings — full replacement of the singleton record.
pub async fn replace_settings(
    State(state): State<AppState>,
    Json(settings): Json<SiteSettings>,
) -> Result<Json<Value>, AppError> {
    if settings.phone.trim().is_empty() {
        return Err(AppError::BadRequest("Phone is required".to_string()));
    }

    let settings = state.settings.replace(settings).await?;
    tracing::info!(phone = %settings.phone, "site settings replaced");
    Ok(Json(json!({ "settings": settings })))
}
