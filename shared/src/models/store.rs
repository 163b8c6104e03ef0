//! Store Model

use serde::{Deserialize, Serialize};

/// Store entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "activa", default = "default_true")]
    pub is_active: bool,
    /// Fiscal establishment code (3 digits)
    #[serde(rename = "codigo_establecimiento", default)]
    pub establishment_code: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Create/update store payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "activa")]
    pub is_active: bool,
    #[serde(rename = "codigo_establecimiento", skip_serializing_if = "Option::is_none")]
    pub establishment_code: Option<String>,
}

impl Default for StoreDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: None,
            phone: None,
            email: None,
            is_active: true,
            establishment_code: None,
        }
    }
}

impl From<&Store> for StoreDraft {
    fn from(store: &Store) -> Self {
        Self {
            name: store.name.clone(),
            address: store.address.clone(),
            phone: store.phone.clone(),
            email: store.email.clone(),
            is_active: store.is_active,
            establishment_code: store.establishment_code.clone(),
        }
    }
}

impl StoreDraft {
    /// Trim text fields; blank optional fields are sent as `null`
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            address: blank_to_none(&self.address),
            phone: blank_to_none(&self.phone),
            email: blank_to_none(&self.email),
            is_active: self.is_active,
            establishment_code: blank_to_none(&self.establishment_code),
        }
    }
}

fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_blanks_become_null() {
        let draft = StoreDraft {
            name: "  Centro ".into(),
            address: Some("   ".into()),
            phone: Some(" 0991234567 ".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(draft.normalized()).unwrap();
        assert_eq!(json["nombre"], "Centro");
        assert!(json["direccion"].is_null());
        assert_eq!(json["telefono"], "0991234567");
        assert_eq!(json["activa"], true);
    }

    #[test]
    fn test_store_defaults() {
        let store: Store = serde_json::from_str(r#"{"id": "t1", "nombre": "Centro"}"#).unwrap();
        assert!(store.is_active);
        assert!(store.establishment_code.is_none());
    }
}
