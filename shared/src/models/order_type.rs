//! Order Type Model

use serde::{Deserialize, Serialize};

use super::NamedEntryDraft;

/// Order type (dine-in, take-away, delivery, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderType {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "activo", default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl From<&OrderType> for NamedEntryDraft {
    fn from(order_type: &OrderType) -> Self {
        Self {
            name: order_type.name.clone(),
            is_active: order_type.is_active,
        }
    }
}
