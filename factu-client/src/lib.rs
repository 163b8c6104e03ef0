//! FactuPOS Client - admin client for the FactuPOS REST backend
//!
//! Typed endpoint wrappers plus the state machines behind the admin
//! screens: list/draft/toggle/delete over configuration resources, the
//! post-checkout payment poller and the plan usage presenter.

pub mod api;
pub mod config;
pub mod crud;
pub mod error;
pub mod format;
pub mod http;
pub mod poller;
pub mod session;
pub mod settings;
pub mod usage;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient, UploadFile};
pub use session::{SessionContext, SessionStore};

pub use crud::{Confirmation, CrudScreen, Notifier, ToggleState, TracingNotifier};
pub use poller::{PaymentStatusSource, PollState, StatusPoller};
pub use settings::{FeaturesScreen, ReceiptConfigScreen};
pub use usage::{PlanAction, ResourceUsage, UsageAlert, UsageBand, UsageReport};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, UserInfo};
