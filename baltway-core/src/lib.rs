pub mod blog;
pub mod booking;
pub mod cities;
pub mod fleet;
pub mod form;
pub mod repository;
pub mod settings;
pub mod validate;
pub mod visibility;

pub use blog::{BlogPost, NewBlogPost, UpdateBlogPost};
pub use booking::{BookingRequest, FormField, PaymentMethod, ReturnTransfer, VehicleClass};
pub use form::{BookingForm, BookingNotifier, NotifyError, SubmitAttempt};
pub use repository::{BlogRepository, SettingsRepository, StoreError};
pub use settings::SiteSettings;
pub use validate::ValidationError;
pub use visibility::VisibilitySet;
