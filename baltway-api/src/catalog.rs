use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use baltway_core::{cities, fleet};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/cities", get(list_cities))
        .route("/v1/fleet", get(list_fleet))
}

/// GET /v1/cities — the transfer city list shown in the origin and
/// destination selectors.
pub async fn list_cities() -> Json<Value> {
    Json(json!({ "cities": cities::CITIES }))
}

/// GET /v1/fleet — vehicle classes with starting prices.
pub async fn list_fleet() -> Json<Value> {
    Json(json!({ "fleet": fleet::FLEET }))
}
