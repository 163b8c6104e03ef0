//! Shared types for the FactuPOS admin client
//!
//! Wire DTOs exchanged with the FactuPOS REST backend, plan capability
//! flags and the backend's error body. Used by `factu-client` and the
//! `factu-admin` CLI.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiErrorBody, ErrorDetail, PLAN_LIMIT_CODE};
