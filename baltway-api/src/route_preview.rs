use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use baltway_core::cities;

use crate::state::AppState;

/// Cruising speed used to estimate drive time from the great-circle
/// distance.
const AVERAGE_SPEED_KMH: f64 = 70.0;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding failed: {0}")]
    Provider(String),
}

/// Resolves a free-text city name to coordinates. Consumed as a black
/// box: any failure degrades to "no map shown" and never blocks a
/// booking.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, city: &str) -> Result<Option<GeoPoint>, GeocodeError>;
}

/// Resolves nothing; deployments wire a real provider.
pub struct NullGeocoder;

#[async_trait]
impl Geocoder for NullGeocoder {
    async fn geocode(&self, _city: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub custom_origin: Option<String>,
    #[serde(default)]
    pub custom_destination: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePreview {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub distance_km: f64,
    pub duration_minutes: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/route-preview", get(route_preview))
}

/// GET /v1/route-preview
///
/// Draws the booking form's route summary between the two endpoints.
/// Responds 204 whenever either endpoint cannot be resolved.
pub async fn route_preview(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Response {
    let origin = resolve(&state, &query.origin, query.custom_origin.as_deref()).await;
    let destination = resolve(
        &state,
        &query.destination,
        query.custom_destination.as_deref(),
    )
    .await;

    match (origin, destination) {
        (Some(origin), Some(destination)) => {
            let distance_km = haversine_km(origin, destination);
            let duration_minutes = (distance_km / AVERAGE_SPEED_KMH * 60.0).round() as i64;
            Json(RoutePreview {
                origin,
                destination,
                distance_km,
                duration_minutes,
            })
            .into_response()
        }
        _ => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn resolve(state: &AppState, code: &str, custom: Option<&str>) -> Option<GeoPoint> {
    if code != cities::CUSTOM {
        return cities::find(code).map(|c| GeoPoint { lat: c.lat, lon: c.lon });
    }

    let name = custom?.trim();
    if name.is_empty() {
        return None;
    }
    match state.geocoder.geocode(name).await {
        Ok(point) => point,
        Err(e) => {
            tracing::debug!(city = name, error = %e, "geocoding failed, skipping route preview");
            None
        }
    }
}

/// Great-circle distance in kilometres.
fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
