use async_trait::async_trait;

use baltway_core::booking::BookingRequest;
use baltway_core::form::{BookingNotifier, NotifyError};

/// Default notifier: records the accepted booking in the log. Real
/// deployments substitute mail or messenger delivery behind the same
/// trait.
pub struct TracingNotifier;

#[async_trait]
impl BookingNotifier for TracingNotifier {
    async fn notify(&self, request: &BookingRequest) -> Result<(), NotifyError> {
        tracing::info!(
            name = %request.name,
            phone = %request.phone,
            vehicle = ?request.vehicle_class,
            date = ?request.date,
            time = %request.time,
            "new transfer booking"
        );
        Ok(())
    }
}
