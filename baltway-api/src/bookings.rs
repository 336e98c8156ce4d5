use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use baltway_core::booking::BookingRequest;
use baltway_core::form::NotifyError;

use crate::error::AppError;
use crate::state::AppState;

/// Conservative bound on the staff-notification call; there is no
/// cancellation once delivery starts.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/bookings", post(submit_booking))
}

/// POST /v1/bookings
///
/// Validates the request snapshot and, when every constraint holds,
/// forwards it to the booking notifier. Violations come back as a 422
/// with the complete per-field list.
pub async fn submit_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    request.validate_now().map_err(AppError::Validation)?;

    match tokio::time::timeout(DELIVERY_TIMEOUT, state.notifier.notify(&request)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(AppError::Internal(e.into())),
        Err(_) => return Err(AppError::Internal(NotifyError::Timeout.into())),
    }

    let reference = Uuid::new_v4();
    tracing::info!(
        %reference,
        origin = %request.origin_city,
        destination = %request.destination_city,
        "booking accepted"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "accepted", "reference": reference })),
    ))
}
