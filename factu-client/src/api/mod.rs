//! Endpoint wrappers
//!
//! Each wrapper borrows an [`HttpClient`](crate::http::HttpClient) and maps
//! one area of the backend to typed calls.

pub mod auth;
pub mod open_tickets;
pub mod plans;
pub mod resources;
pub mod settings;
pub mod subscription;
pub mod superadmin;

pub use auth::{AuthApi, AuthOutcome, RegistrationForm, apply_login};
pub use open_tickets::{BulkDeleteReport, OpenTicketsApi};
pub use plans::PlansApi;
pub use resources::{CrudRecord, ResourceApi, Toggleable, list_categories};
pub use settings::SettingsApi;
pub use subscription::SubscriptionApi;
pub use superadmin::SuperAdminApi;

/// Percent-encode a path segment (ids, session ids)
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
