//! Payment Method Model

use serde::{Deserialize, Serialize};

/// Payment method offered at the point of sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "activo", default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create/update payload shared by name + active-flag catalogs
/// (payment methods, order types)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntryDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "activo")]
    pub is_active: bool,
}

impl Default for NamedEntryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
        }
    }
}

impl From<&PaymentMethod> for NamedEntryDraft {
    fn from(method: &PaymentMethod) -> Self {
        Self {
            name: method.name.clone(),
            is_active: method.is_active,
        }
    }
}
