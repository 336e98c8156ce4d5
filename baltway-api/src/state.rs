use std::sync::Arc;

use baltway_core::form::BookingNotifier;
use baltway_core::repository::{BlogRepository, SettingsRepository};

use crate::auth::CredentialVerifier;
use crate::route_preview::Geocoder;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<dyn BlogRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub notifier: Arc<dyn BookingNotifier>,
    pub geocoder: Arc<dyn Geocoder>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub auth: AuthConfig,
}
