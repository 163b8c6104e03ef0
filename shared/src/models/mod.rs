//! Data models
//!
//! Records exchanged with the FactuPOS backend. IDs are opaque strings.
//! Wire field names follow the backend (Spanish); Rust names are English.

pub mod category;
pub mod open_ticket;
pub mod order_type;
pub mod payment_method;
pub mod plan;
pub mod pos_features;
pub mod printer_group;
pub mod receipt_config;
pub mod store;
pub mod subscription;
pub mod superadmin;
pub mod tax;
pub mod terminal;

// Re-exports
pub use category::*;
pub use open_ticket::*;
pub use order_type::*;
pub use payment_method::*;
pub use plan::*;
pub use pos_features::*;
pub use printer_group::*;
pub use receipt_config::*;
pub use store::*;
pub use subscription::*;
pub use superadmin::*;
pub use tax::*;
pub use terminal::*;
