use std::collections::BTreeSet;

use serde::Serialize;

use crate::booking::{BookingRequest, FormField, ReturnTransfer};
use crate::cities;

/// The subset of conditionally disclosed form fields currently shown,
/// derived from the other field values.
///
/// This is a pure function of the snapshot: hiding a field never clears
/// its stored value, so re-showing it restores what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibilitySet(BTreeSet<FormField>);

impl VisibilitySet {
    pub fn derive(request: &BookingRequest) -> Self {
        let mut visible = BTreeSet::new();
        if request.origin_city == cities::CUSTOM {
            visible.insert(FormField::CustomOriginCity);
        }
        if request.destination_city == cities::CUSTOM {
            visible.insert(FormField::CustomDestinationCity);
        }
        if !request.tell_driver {
            visible.insert(FormField::DestinationAddress);
        }
        if request.return_transfer == ReturnTransfer::Yes {
            visible.insert(FormField::ReturnDate);
            visible.insert(FormField::ReturnTime);
        }
        Self(visible)
    }

    pub fn is_visible(&self, field: FormField) -> bool {
        self.0.contains(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.iter().copied()
    }
}
