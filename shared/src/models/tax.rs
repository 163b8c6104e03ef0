//! Tax Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the tax is already part of the listed price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxKind {
    #[serde(rename = "incluido")]
    Included,
    #[default]
    #[serde(rename = "no_incluido")]
    NotIncluded,
}

impl TaxKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaxKind::Included => "Included in price",
            TaxKind::NotIncluded => "Not included in price",
        }
    }
}

/// Tax entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Percentage, e.g. 15 for 15 %
    #[serde(rename = "tasa", with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    #[serde(rename = "tipo", default)]
    pub kind: TaxKind,
    #[serde(rename = "activo", default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create/update tax payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tasa", with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    #[serde(rename = "tipo")]
    pub kind: TaxKind,
    #[serde(rename = "activo")]
    pub is_active: bool,
}

impl Default for TaxDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            rate: Decimal::ZERO,
            kind: TaxKind::NotIncluded,
            is_active: true,
        }
    }
}

impl From<&Tax> for TaxDraft {
    fn from(tax: &Tax) -> Self {
        Self {
            name: tax.name.clone(),
            rate: tax.rate,
            kind: tax.kind,
            is_active: tax.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_wire_format() {
        let tax: Tax = serde_json::from_str(
            r#"{"id": "i1", "nombre": "IVA", "tasa": 15.0, "tipo": "incluido", "activo": false}"#,
        )
        .unwrap();
        assert_eq!(tax.rate, Decimal::new(15, 0));
        assert_eq!(tax.kind, TaxKind::Included);

        let json = serde_json::to_value(TaxDraft::from(&tax)).unwrap();
        assert_eq!(json["tasa"], 15.0);
        assert_eq!(json["tipo"], "incluido");
    }
}
