//! POS Features Model
//!
//! Optional modules the organisation can switch on for its terminals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A switchable POS module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosFeature {
    /// Shift-based cash drawer closures
    CashClosures,
    OpenTickets,
    /// Order types (dine-in, take-away, ...)
    OrderTypes,
    /// Block sales without stock
    StockSales,
    /// Employee time clock
    TimeClock,
    KitchenPrinters,
    CustomerDisplay,
}

impl PosFeature {
    pub const ALL: [PosFeature; 7] = [
        PosFeature::CashClosures,
        PosFeature::OpenTickets,
        PosFeature::OrderTypes,
        PosFeature::StockSales,
        PosFeature::TimeClock,
        PosFeature::KitchenPrinters,
        PosFeature::CustomerDisplay,
    ];

    pub fn wire_key(&self) -> &'static str {
        match self {
            PosFeature::CashClosures => "cierres_caja",
            PosFeature::OpenTickets => "tickets_abiertos",
            PosFeature::OrderTypes => "tipo_pedido",
            PosFeature::StockSales => "venta_con_stock",
            PosFeature::TimeClock => "funcion_reloj",
            PosFeature::KitchenPrinters => "impresoras_cocina",
            PosFeature::CustomerDisplay => "pantalla_clientes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_key() == s)
    }
}

/// Refused feature toggle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureToggleError {
    #[error("Open tickets cannot be disabled while {0} saved ticket(s) exist; delete them first")]
    OpenTicketsInUse(u64),
}

/// Feature switches of the organisation (`/api/funciones`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosFeatures {
    #[serde(rename = "cierres_caja", default)]
    pub cash_closures: bool,
    #[serde(rename = "tickets_abiertos", default)]
    pub open_tickets: bool,
    #[serde(rename = "tipo_pedido", default)]
    pub order_types: bool,
    #[serde(rename = "venta_con_stock", default)]
    pub stock_sales: bool,
    #[serde(rename = "funcion_reloj", default)]
    pub time_clock: bool,
    #[serde(rename = "impresoras_cocina", default)]
    pub kitchen_printers: bool,
    #[serde(rename = "pantalla_clientes", default)]
    pub customer_display: bool,
    /// Saved open tickets; reported by the backend
    #[serde(rename = "tickets_abiertos_count", default)]
    pub open_tickets_count: u64,
}

impl Default for PosFeatures {
    fn default() -> Self {
        Self {
            cash_closures: true,
            open_tickets: false,
            order_types: false,
            stock_sales: true,
            time_clock: false,
            kitchen_printers: false,
            customer_display: false,
            open_tickets_count: 0,
        }
    }
}

impl PosFeatures {
    pub fn is_enabled(&self, feature: PosFeature) -> bool {
        match feature {
            PosFeature::CashClosures => self.cash_closures,
            PosFeature::OpenTickets => self.open_tickets,
            PosFeature::OrderTypes => self.order_types,
            PosFeature::StockSales => self.stock_sales,
            PosFeature::TimeClock => self.time_clock,
            PosFeature::KitchenPrinters => self.kitchen_printers,
            PosFeature::CustomerDisplay => self.customer_display,
        }
    }

    fn flag_mut(&mut self, feature: PosFeature) -> &mut bool {
        match feature {
            PosFeature::CashClosures => &mut self.cash_closures,
            PosFeature::OpenTickets => &mut self.open_tickets,
            PosFeature::OrderTypes => &mut self.order_types,
            PosFeature::StockSales => &mut self.stock_sales,
            PosFeature::TimeClock => &mut self.time_clock,
            PosFeature::KitchenPrinters => &mut self.kitchen_printers,
            PosFeature::CustomerDisplay => &mut self.customer_display,
        }
    }

    /// Flip a feature locally, returning its new value
    ///
    /// Open tickets stay enabled while saved tickets exist.
    pub fn toggle(&mut self, feature: PosFeature) -> Result<bool, FeatureToggleError> {
        if feature == PosFeature::OpenTickets && self.open_tickets && self.open_tickets_count > 0 {
            return Err(FeatureToggleError::OpenTicketsInUse(self.open_tickets_count));
        }
        let flag = self.flag_mut(feature);
        *flag = !*flag;
        Ok(*flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_flag() {
        let mut features = PosFeatures::default();
        assert_eq!(features.toggle(PosFeature::TimeClock), Ok(true));
        assert!(features.is_enabled(PosFeature::TimeClock));
        assert_eq!(features.toggle(PosFeature::TimeClock), Ok(false));
    }

    #[test]
    fn test_open_tickets_cannot_be_disabled_while_in_use() {
        let mut features = PosFeatures {
            open_tickets: true,
            open_tickets_count: 2,
            ..Default::default()
        };
        assert_eq!(
            features.toggle(PosFeature::OpenTickets),
            Err(FeatureToggleError::OpenTicketsInUse(2))
        );
        assert!(features.open_tickets);

        features.open_tickets_count = 0;
        assert_eq!(features.toggle(PosFeature::OpenTickets), Ok(false));
    }

    #[test]
    fn test_enabling_open_tickets_ignores_count() {
        let mut features = PosFeatures {
            open_tickets_count: 3,
            ..Default::default()
        };
        assert_eq!(features.toggle(PosFeature::OpenTickets), Ok(true));
    }

    #[test]
    fn test_parse_wire_key() {
        assert_eq!(PosFeature::parse("funcion_reloj"), Some(PosFeature::TimeClock));
        assert_eq!(PosFeature::parse("reloj"), None);
    }
}
