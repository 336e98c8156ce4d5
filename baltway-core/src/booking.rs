use serde::{Deserialize, Serialize};

/// Vehicle classes offered by the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Standard,
    Comfort,
    Business,
    Premium,
    Minivan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnTransfer {
    No,
    Yes,
}

/// Every field of the booking form, used to key validation errors and
/// visibility decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Phone,
    VehicleClass,
    Date,
    Time,
    OriginCity,
    CustomOriginCity,
    OriginAddress,
    DestinationCity,
    CustomDestinationCity,
    TellDriver,
    DestinationAddress,
    PaymentMethod,
    ReturnTransfer,
    ReturnDate,
    ReturnTime,
    Comments,
    Agreement,
}

/// A proposed transfer order as captured by the booking form.
///
/// Conditional fields (`custom_*_city`, `destination_address`,
/// `return_date`, `return_time`) are syntactically optional but become
/// mandatory under their trigger condition; see [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub vehicle_class: VehicleClass,
    pub date: Option<chrono::NaiveDate>,
    pub time: String,
    pub origin_city: String,
    pub custom_origin_city: String,
    pub origin_address: String,
    pub destination_city: String,
    pub custom_destination_city: String,
    pub tell_driver: bool,
    pub destination_address: String,
    pub payment_method: PaymentMethod,
    pub return_transfer: ReturnTransfer,
    pub return_date: Option<chrono::NaiveDate>,
    pub return_time: String,
    pub comments: String,
    pub agreement: bool,
}

impl Default for BookingRequest {
    /// The form-mount state: Kaliningrad pre-selected as origin, cash
    /// payment, no return leg, consent unchecked.
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            vehicle_class: VehicleClass::Standard,
            date: None,
            time: String::new(),
            origin_city: crate::cities::DEFAULT_ORIGIN.to_string(),
            custom_origin_city: String::new(),
            origin_address: String::new(),
            destination_city: String::new(),
            custom_destination_city: String::new(),
            tell_driver: false,
            destination_address: String::new(),
            payment_method: PaymentMethod::Cash,
            return_transfer: ReturnTransfer::No,
            return_date: None,
            return_time: String::new(),
            comments: String::new(),
            agreement: false,
        }
    }
}
