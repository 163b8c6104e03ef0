//! Receipt Config Model
//!
//! Business details and print options rendered on customer receipts.

use serde::{Deserialize, Serialize};

/// Receipt settings (`/api/config`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptConfig {
    #[serde(rename = "cabecera", default)]
    pub header: String,
    #[serde(rename = "nombre_negocio", default)]
    pub business_name: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    /// Tax identification number
    #[serde(rename = "rfc", default)]
    pub tax_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "sitio_web", default)]
    pub website: String,
    #[serde(rename = "mensaje_pie", default)]
    pub footer: String,
    #[serde(rename = "imprimir_ticket", default)]
    pub print_ticket: bool,
    #[serde(rename = "mostrar_info_cliente", default)]
    pub show_customer_info: bool,
    #[serde(rename = "mostrar_comentarios", default)]
    pub show_comments: bool,
    /// Logo used in emailed receipts (relative URL)
    #[serde(rename = "logo_email", default)]
    pub email_logo: String,
    /// Logo printed on paper receipts (relative URL)
    #[serde(rename = "logo_impreso", default)]
    pub printed_logo: String,
}

/// Which receipt logo an upload replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoKind {
    Email,
    Printed,
}

impl LogoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoKind::Email => "email",
            LogoKind::Printed => "impreso",
        }
    }
}

/// Answer of `POST /api/config/upload-logo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoUploadResponse {
    /// Relative URL of the stored image
    pub url: String,
}

impl ReceiptConfig {
    pub fn set_logo(&mut self, kind: LogoKind, url: impl Into<String>) {
        match kind {
            LogoKind::Email => self.email_logo = url.into(),
            LogoKind::Printed => self.printed_logo = url.into(),
        }
    }
}
