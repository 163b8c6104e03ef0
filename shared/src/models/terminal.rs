//! POS Terminal Model

use serde::{Deserialize, Serialize};

/// POS terminal (TPV) bound to a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosTerminal {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Fiscal emission point (3 digits)
    #[serde(rename = "punto_emision")]
    pub emission_point: String,
    #[serde(rename = "tienda_id")]
    pub store_id: String,
    #[serde(rename = "tienda_nombre", default)]
    pub store_name: Option<String>,
    #[serde(rename = "activo", default = "default_true")]
    pub is_active: bool,
    /// An employee has an open session on this terminal
    #[serde(rename = "ocupado", default)]
    pub occupied: bool,
    #[serde(rename = "ocupado_por_nombre", default)]
    pub occupied_by: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Create/update terminal payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosTerminalDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "punto_emision")]
    pub emission_point: String,
    #[serde(rename = "tienda_id")]
    pub store_id: String,
    #[serde(rename = "activo")]
    pub is_active: bool,
}

impl Default for PosTerminalDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            emission_point: String::new(),
            store_id: String::new(),
            is_active: true,
        }
    }
}

impl From<&PosTerminal> for PosTerminalDraft {
    fn from(terminal: &PosTerminal) -> Self {
        Self {
            name: terminal.name.clone(),
            emission_point: terminal.emission_point.clone(),
            store_id: terminal.store_id.clone(),
            is_active: terminal.is_active,
        }
    }
}

impl PosTerminalDraft {
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            emission_point: self.emission_point.trim().to_string(),
            store_id: self.store_id.clone(),
            is_active: self.is_active,
        }
    }
}
