//! Open Ticket Model
//!
//! Open tickets are saved, uncharged orders held for later payment.
//! Presets are the names offered when a cashier parks a ticket.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Predefined open-ticket name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketPreset {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Create preset payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketPresetDraft {
    #[serde(rename = "nombre")]
    pub name: String,
}

impl From<&TicketPreset> for TicketPresetDraft {
    fn from(preset: &TicketPreset) -> Self {
        Self {
            name: preset.name.clone(),
        }
    }
}

/// A line of a parked ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenTicketItem {
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "cantidad", default)]
    pub quantity: Decimal,
}

/// Ticket parked on a POS terminal (`/api/tickets-abiertos-pos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenTicket {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub items: Vec<OpenTicketItem>,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<String>,
    #[serde(rename = "vendedor_nombre", default)]
    pub employee_name: Option<String>,
}
