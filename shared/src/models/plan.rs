//! Plan Model
//!
//! Subscription tiers, their limits and capability flags, plus the
//! organisation's current consumption.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Plan id of the free tier
pub const FREE_PLAN_ID: &str = "gratis";

// =============================================================================
// Limit
// =============================================================================

/// A plan limit
///
/// The backend encodes "unlimited" as `-1`; every negative value is read as
/// unlimited so no percentage is ever computed against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Limit {
    Unlimited,
    Max(u64),
}

impl Limit {
    /// Wire value for unlimited
    pub const UNLIMITED_RAW: i64 = -1;

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Limit::Unlimited)
    }

    /// Maximum allowed, `None` when unlimited
    pub fn max(&self) -> Option<u64> {
        match self {
            Limit::Unlimited => None,
            Limit::Max(n) => Some(*n),
        }
    }
}

impl From<i64> for Limit {
    fn from(raw: i64) -> Self {
        if raw < 0 {
            Limit::Unlimited
        } else {
            Limit::Max(raw as u64)
        }
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Unlimited => Limit::UNLIMITED_RAW,
            Limit::Max(n) => i64::try_from(n).unwrap_or(i64::MAX),
        }
    }
}

// =============================================================================
// Tracked resources
// =============================================================================

/// Resources metered against plan limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanResource {
    /// Invoices issued this month
    Invoices,
    /// Employees
    Users,
    Products,
    /// POS terminals
    Terminals,
    Customers,
}

impl PlanResource {
    pub const ALL: [PlanResource; 5] = [
        PlanResource::Invoices,
        PlanResource::Users,
        PlanResource::Products,
        PlanResource::Terminals,
        PlanResource::Customers,
    ];

    /// Path segment used by `/api/verificar-limite/{recurso}`
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanResource::Invoices => "facturas",
            PlanResource::Users => "usuarios",
            PlanResource::Products => "productos",
            PlanResource::Terminals => "tpv",
            PlanResource::Customers => "clientes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanResource::Invoices => "Invoices this month",
            PlanResource::Users => "Employees",
            PlanResource::Products => "Products",
            PlanResource::Terminals => "Points of sale",
            PlanResource::Customers => "Customers",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl std::fmt::Display for PlanResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Limits of the organisation's current plan (`limites` in `/api/mi-plan`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    #[serde(rename = "facturas")]
    pub invoices: Limit,
    #[serde(rename = "usuarios")]
    pub users: Limit,
    #[serde(rename = "productos")]
    pub products: Limit,
    #[serde(rename = "tpv")]
    pub terminals: Limit,
    #[serde(rename = "clientes")]
    pub customers: Limit,
}

impl PlanLimits {
    pub fn get(&self, resource: PlanResource) -> Limit {
        match resource {
            PlanResource::Invoices => self.invoices,
            PlanResource::Users => self.users,
            PlanResource::Products => self.products,
            PlanResource::Terminals => self.terminals,
            PlanResource::Customers => self.customers,
        }
    }
}

/// Current consumption counters (`uso_actual` in `/api/mi-plan`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUsage {
    #[serde(rename = "facturas_mes", default)]
    pub invoices_this_month: u64,
    #[serde(rename = "usuarios", default)]
    pub users: u64,
    #[serde(rename = "productos", default)]
    pub products: u64,
    #[serde(rename = "tpvs", default)]
    pub terminals: u64,
    #[serde(rename = "clientes", default)]
    pub customers: u64,
}

impl OrganizationUsage {
    pub fn get(&self, resource: PlanResource) -> u64 {
        match resource {
            PlanResource::Invoices => self.invoices_this_month,
            PlanResource::Users => self.users,
            PlanResource::Products => self.products,
            PlanResource::Terminals => self.terminals,
            PlanResource::Customers => self.customers,
        }
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// Capability unlocked by a plan tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanCapability {
    ElectronicInvoicing,
    AdvancedReports,
    OpenTickets,
    MultiStore,
    TicketLogo,
    ExcelExport,
    PrioritySupport,
}

impl PlanCapability {
    pub const ALL: [PlanCapability; 7] = [
        PlanCapability::ElectronicInvoicing,
        PlanCapability::AdvancedReports,
        PlanCapability::OpenTickets,
        PlanCapability::MultiStore,
        PlanCapability::TicketLogo,
        PlanCapability::ExcelExport,
        PlanCapability::PrioritySupport,
    ];

    /// Key used in the backend's `funciones` map
    pub fn wire_key(&self) -> &'static str {
        match self {
            PlanCapability::ElectronicInvoicing => "facturacion_electronica",
            PlanCapability::AdvancedReports => "reportes_avanzados",
            PlanCapability::OpenTickets => "tickets_abiertos",
            PlanCapability::MultiStore => "multi_tienda",
            PlanCapability::TicketLogo => "logo_ticket",
            PlanCapability::ExcelExport => "exportar_excel",
            PlanCapability::PrioritySupport => "soporte_prioritario",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanCapability::ElectronicInvoicing => "Electronic invoicing",
            PlanCapability::AdvancedReports => "Advanced reports",
            PlanCapability::OpenTickets => "Open tickets",
            PlanCapability::MultiStore => "Multiple stores",
            PlanCapability::TicketLogo => "Logo on tickets",
            PlanCapability::ExcelExport => "Excel export",
            PlanCapability::PrioritySupport => "Priority support",
        }
    }
}

/// Capability flags of a plan (`funciones`)
///
/// A fixed set of flags; unknown keys sent by the backend are ignored and
/// missing keys read as disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCapabilities {
    #[serde(rename = "facturacion_electronica", default)]
    pub electronic_invoicing: bool,
    #[serde(rename = "reportes_avanzados", default)]
    pub advanced_reports: bool,
    #[serde(rename = "tickets_abiertos", default)]
    pub open_tickets: bool,
    #[serde(rename = "multi_tienda", default)]
    pub multi_store: bool,
    #[serde(rename = "logo_ticket", default)]
    pub ticket_logo: bool,
    #[serde(rename = "exportar_excel", default)]
    pub excel_export: bool,
    #[serde(rename = "soporte_prioritario", default)]
    pub priority_support: bool,
}

impl PlanCapabilities {
    pub fn has(&self, capability: PlanCapability) -> bool {
        match capability {
            PlanCapability::ElectronicInvoicing => self.electronic_invoicing,
            PlanCapability::AdvancedReports => self.advanced_reports,
            PlanCapability::OpenTickets => self.open_tickets,
            PlanCapability::MultiStore => self.multi_store,
            PlanCapability::TicketLogo => self.ticket_logo,
            PlanCapability::ExcelExport => self.excel_export,
            PlanCapability::PrioritySupport => self.priority_support,
        }
    }

    pub fn set(&mut self, capability: PlanCapability, enabled: bool) {
        let flag = match capability {
            PlanCapability::ElectronicInvoicing => &mut self.electronic_invoicing,
            PlanCapability::AdvancedReports => &mut self.advanced_reports,
            PlanCapability::OpenTickets => &mut self.open_tickets,
            PlanCapability::MultiStore => &mut self.multi_store,
            PlanCapability::TicketLogo => &mut self.ticket_logo,
            PlanCapability::ExcelExport => &mut self.excel_export,
            PlanCapability::PrioritySupport => &mut self.priority_support,
        };
        *flag = enabled;
    }

    /// Enabled capabilities in display order
    pub fn enabled(&self) -> impl Iterator<Item = PlanCapability> + '_ {
        PlanCapability::ALL.into_iter().filter(|c| self.has(*c))
    }
}

// =============================================================================
// Plan
// =============================================================================

/// Plan entity (public catalog and super-admin management)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "moneda", default = "default_currency")]
    pub currency: String,
    /// Billing period, e.g. "mensual"
    #[serde(rename = "periodo", default = "default_period")]
    pub period: String,
    #[serde(rename = "limite_facturas")]
    pub invoice_limit: Limit,
    #[serde(rename = "limite_usuarios")]
    pub user_limit: Limit,
    #[serde(rename = "limite_productos")]
    pub product_limit: Limit,
    #[serde(rename = "limite_tpv")]
    pub terminal_limit: Limit,
    #[serde(rename = "limite_clientes")]
    pub customer_limit: Limit,
    #[serde(rename = "dias_historial", default)]
    pub history_days: i64,
    #[serde(rename = "funciones", default)]
    pub capabilities: PlanCapabilities,
    #[serde(default = "default_true")]
    pub visible_en_web: bool,
    #[serde(rename = "activo", default = "default_true")]
    pub is_active: bool,
    /// Featured tier, highlighted in the catalog
    #[serde(rename = "destacado", default)]
    pub is_featured: bool,
    #[serde(rename = "orden", default)]
    pub sort_order: i32,
    #[serde(default)]
    pub color: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_period() -> String {
    "mensual".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Plan {
    /// Template used by the super-admin "new plan" dialog
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            currency: default_currency(),
            period: default_period(),
            invoice_limit: Limit::Max(50),
            user_limit: Limit::Max(1),
            product_limit: Limit::Max(50),
            terminal_limit: Limit::Max(1),
            customer_limit: Limit::Max(20),
            history_days: 7,
            capabilities: PlanCapabilities::default(),
            visible_en_web: true,
            is_active: true,
            is_featured: false,
            sort_order: 1,
            color: Some("#3b82f6".to_string()),
        }
    }
}

impl Plan {
    pub fn limits(&self) -> PlanLimits {
        PlanLimits {
            invoices: self.invoice_limit,
            users: self.user_limit,
            products: self.product_limit,
            terminals: self.terminal_limit,
            customers: self.customer_limit,
        }
    }

    pub fn is_free(&self) -> bool {
        self.id == FREE_PLAN_ID
    }
}

/// Current plan and usage of the logged-in organisation (`/api/mi-plan`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyPlan {
    pub plan_id: String,
    #[serde(rename = "plan_nombre")]
    pub plan_name: String,
    #[serde(rename = "plan_precio", with = "rust_decimal::serde::float")]
    pub plan_price: Decimal,
    #[serde(rename = "plan_periodo", default = "default_period")]
    pub plan_period: String,
    #[serde(rename = "limites")]
    pub limits: PlanLimits,
    #[serde(rename = "uso_actual")]
    pub usage: OrganizationUsage,
    #[serde(rename = "funciones", default)]
    pub capabilities: PlanCapabilities,
    #[serde(rename = "dias_historial", default)]
    pub history_days: Option<i64>,
}

impl MyPlan {
    pub fn is_free(&self) -> bool {
        self.plan_id == FREE_PLAN_ID
    }
}

/// Answer of `/api/verificar-limite/{recurso}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitCheck {
    #[serde(rename = "puede_crear")]
    pub can_create: bool,
    #[serde(rename = "mensaje", default)]
    pub message: String,
    #[serde(rename = "uso_actual", default)]
    pub usage: u64,
    #[serde(rename = "limite")]
    pub limit: Limit,
    #[serde(rename = "ilimitado", default)]
    pub unlimited: bool,
}

impl LimitCheck {
    /// Check result used when the backend cannot be asked
    pub fn permissive() -> Self {
        Self {
            can_create: true,
            message: String::new(),
            usage: 0,
            limit: Limit::Unlimited,
            unlimited: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_ENTRY: &str = r#"{
        "id": "pro",
        "nombre": "Pro",
        "descripcion": "Para negocios en crecimiento",
        "precio": 29.99,
        "periodo": "mensual",
        "limite_facturas": -1,
        "limite_usuarios": 5,
        "limite_productos": 1000,
        "limite_tpv": 3,
        "limite_clientes": -1,
        "dias_historial": 365,
        "funciones": {"facturacion_electronica": true, "multi_tienda": true, "nueva_funcion": true},
        "destacado": true
    }"#;

    #[test]
    fn test_limit_sentinel() {
        assert_eq!(Limit::from(-1), Limit::Unlimited);
        assert_eq!(Limit::from(0), Limit::Max(0));
        assert_eq!(i64::from(Limit::Unlimited), -1);
        assert_eq!(serde_json::to_string(&Limit::Max(50)).unwrap(), "50");
        assert_eq!(serde_json::from_str::<Limit>("-1").unwrap(), Limit::Unlimited);
    }

    #[test]
    fn test_catalog_plan_deserialize() {
        let plan: Plan = serde_json::from_str(CATALOG_ENTRY).unwrap();
        assert_eq!(plan.price, Decimal::new(2999, 2));
        assert!(plan.invoice_limit.is_unlimited());
        assert_eq!(plan.terminal_limit, Limit::Max(3));
        assert!(plan.is_featured);
        assert!(plan.is_active);
        assert_eq!(plan.currency, "USD");
        assert!(plan.capabilities.has(PlanCapability::ElectronicInvoicing));
        assert!(!plan.capabilities.has(PlanCapability::ExcelExport));
        assert_eq!(plan.limits().get(PlanResource::Users), Limit::Max(5));
    }

    #[test]
    fn test_capabilities_roundtrip_uses_wire_keys() {
        let mut caps = PlanCapabilities::default();
        caps.set(PlanCapability::OpenTickets, true);
        let json = serde_json::to_value(caps).unwrap();
        assert_eq!(json["tickets_abiertos"], true);
        assert_eq!(json["multi_tienda"], false);
        assert_eq!(caps.enabled().collect::<Vec<_>>(), vec![PlanCapability::OpenTickets]);
    }

    #[test]
    fn test_my_plan_deserialize() {
        let json = r#"{
            "plan_id": "gratis",
            "plan_nombre": "Gratis",
            "plan_precio": 0,
            "plan_periodo": "mensual",
            "limites": {"facturas": 50, "usuarios": 1, "productos": 50, "tpv": 1, "clientes": -1},
            "uso_actual": {"facturas_mes": 45, "usuarios": 1, "productos": 12, "tpvs": 1, "clientes": 300},
            "funciones": {}
        }"#;
        let plan: MyPlan = serde_json::from_str(json).unwrap();
        assert!(plan.is_free());
        assert_eq!(plan.usage.get(PlanResource::Invoices), 45);
        assert!(plan.limits.get(PlanResource::Customers).is_unlimited());
    }

    #[test]
    fn test_resource_parse() {
        assert_eq!(PlanResource::parse("tpv"), Some(PlanResource::Terminals));
        assert_eq!(PlanResource::parse("mesas"), None);
        assert_eq!(PlanResource::Invoices.to_string(), "facturas");
    }

    #[test]
    fn test_default_plan_template() {
        let plan = Plan::default();
        assert_eq!(plan.user_limit, Limit::Max(1));
        assert_eq!(plan.sort_order, 1);
        assert!(!plan.is_free());
    }
}
