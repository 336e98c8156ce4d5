use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::booking::BookingRequest;
use crate::validate::ValidationError;
use crate::visibility::VisibilitySet;

/// Outcome of a submit attempt on a [`BookingForm`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// The request validated; the caller should now deliver the snapshot
    /// and report back via [`BookingForm::finish_submit`].
    Started(BookingRequest),
    /// One or more constraints failed; the form stays editable.
    Rejected(Vec<ValidationError>),
    /// A submission is already in flight; this attempt is dropped.
    Ignored,
}

/// Delivery failure reported by a [`BookingNotifier`].
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("booking delivery timed out")]
    Timeout,
    #[error("booking delivery failed: {0}")]
    Delivery(String),
}

/// External collaborator that forwards an accepted booking to staff.
/// Only ever invoked with a request that already validated.
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn notify(&self, request: &BookingRequest) -> Result<(), NotifyError>;
}

/// Driver for one booking-form instance: owns the request being edited
/// and gates submission so that re-entrant attempts are ignored while a
/// previous one is in flight.
#[derive(Debug, Default)]
pub struct BookingForm {
    request: BookingRequest,
    in_flight: bool,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) -> &BookingRequest {
        &self.request
    }

    /// Mutable access for field-by-field edits. Edits while a submission
    /// is in flight are allowed; they only affect the next attempt.
    pub fn request_mut(&mut self) -> &mut BookingRequest {
        &mut self.request
    }

    /// Which conditional fields the UI should currently show.
    pub fn visibility(&self) -> VisibilitySet {
        VisibilitySet::derive(&self.request)
    }

    /// True while a submission is running; the submit control should be
    /// disabled and a loading indication shown.
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Attempt to submit the current snapshot.
    pub fn begin_submit(&mut self, today: NaiveDate) -> SubmitAttempt {
        if self.in_flight {
            tracing::debug!("submit attempt ignored: previous submission still in flight");
            return SubmitAttempt::Ignored;
        }
        match self.request.validate(today) {
            Ok(()) => {
                self.in_flight = true;
                SubmitAttempt::Started(self.request.clone())
            }
            Err(violations) => SubmitAttempt::Rejected(violations),
        }
    }

    /// Complete the in-flight submission. On success the form resets to
    /// defaults; on failure the user's input is kept for a retry. Either
    /// way the submit control re-enables.
    pub fn finish_submit(&mut self, success: bool) {
        if success {
            self.request = BookingRequest::default();
        }
        self.in_flight = false;
    }
}
