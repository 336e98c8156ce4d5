use chrono::NaiveDate;
use serde::Serialize;

use crate::booking::{BookingRequest, FormField, ReturnTransfer};
use crate::cities;

/// A single constraint violation, attached to the offending field.
///
/// All failures here are recoverable by correcting input; there is no
/// fatal variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    fn new(field: FormField, message: &str) -> Self {
        Self { field, message: message.to_string() }
    }
}

impl BookingRequest {
    /// Check every constraint against the given snapshot and enumerate
    /// all violations at once, not just the first.
    ///
    /// `today` is the local calendar date; dates strictly before it are
    /// rejected, `today` itself is still bookable.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.name.trim().len() < 2 {
            errors.push(ValidationError::new(
                FormField::Name,
                "Name must contain at least 2 characters",
            ));
        }
        if self.phone.trim().len() < 10 {
            errors.push(ValidationError::new(
                FormField::Phone,
                "Enter a valid phone number",
            ));
        }

        match self.date {
            None => errors.push(ValidationError::new(
                FormField::Date,
                "Specify the trip date",
            )),
            Some(date) if date < today => errors.push(ValidationError::new(
                FormField::Date,
                "The trip date cannot be in the past",
            )),
            Some(_) => {}
        }
        if self.time.is_empty() {
            errors.push(ValidationError::new(
                FormField::Time,
                "Specify the trip time",
            ));
        }

        if self.origin_city.is_empty() {
            errors.push(ValidationError::new(
                FormField::OriginCity,
                "Select an origin city",
            ));
        } else if self.origin_city == cities::CUSTOM && self.custom_origin_city.trim().len() < 2 {
            errors.push(ValidationError::new(
                FormField::CustomOriginCity,
                "Enter the city name",
            ));
        }
        if self.origin_address.trim().len() < 2 {
            errors.push(ValidationError::new(
                FormField::OriginAddress,
                "Specify the pickup address",
            ));
        }

        if self.destination_city.is_empty() {
            errors.push(ValidationError::new(
                FormField::DestinationCity,
                "Select a destination city",
            ));
        } else if self.destination_city == cities::CUSTOM
            && self.custom_destination_city.trim().len() < 2
        {
            errors.push(ValidationError::new(
                FormField::CustomDestinationCity,
                "Enter the city name",
            ));
        }
        // The drop-off address is only required when the customer has not
        // opted to tell the driver in person.
        if !self.tell_driver && self.destination_address.trim().len() < 2 {
            errors.push(ValidationError::new(
                FormField::DestinationAddress,
                "Specify the drop-off address or choose 'I will tell the driver'",
            ));
        }

        if self.return_transfer == ReturnTransfer::Yes {
            // Whichever of the two sub-fields is missing, the error is
            // surfaced on the return date control, matching the form's
            // original attachment.
            if self.return_date.is_none() || self.return_time.is_empty() {
                errors.push(ValidationError::new(
                    FormField::ReturnDate,
                    "Specify the date and time of the return transfer",
                ));
            } else if self.return_date.is_some_and(|d| d < today) {
                errors.push(ValidationError::new(
                    FormField::ReturnDate,
                    "The return date cannot be in the past",
                ));
            }
        }

        if !self.agreement {
            errors.push(ValidationError::new(
                FormField::Agreement,
                "Consent to personal data processing is required",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// [`validate`](Self::validate) against the local calendar date.
    pub fn validate_now(&self) -> Result<(), Vec<ValidationError>> {
        self.validate(chrono::Local::now().date_naive())
    }
}
