//! Super-admin Model
//!
//! Platform-wide views only available to the `superadmin` role.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrganizationUsage;

/// Organisation row of the super-admin panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Store code used at POS login
    #[serde(rename = "codigo_tienda", default)]
    pub store_code: Option<String>,
    /// Plan id; missing means the free tier
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(rename = "propietario_nombre", default)]
    pub owner_name: Option<String>,
    #[serde(rename = "propietario_email", default)]
    pub owner_email: Option<String>,
    #[serde(rename = "uso", default)]
    pub usage: Option<OrganizationUsage>,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<String>,
    #[serde(rename = "ultima_actividad", default)]
    pub last_activity: Option<String>,
}

impl Organization {
    pub fn plan_id(&self) -> &str {
        self.plan.as_deref().unwrap_or(super::FREE_PLAN_ID)
    }
}

/// Platform counters (`/api/superadmin/dashboard`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    #[serde(rename = "total_organizaciones", default)]
    pub total_organizations: u64,
    #[serde(rename = "total_usuarios", default)]
    pub total_users: u64,
    #[serde(rename = "total_facturas_mes", default)]
    pub invoices_this_month: u64,
    #[serde(rename = "ingresos_mensuales_estimados", with = "rust_decimal::serde::float", default)]
    pub estimated_monthly_revenue: Decimal,
    /// Organisation count per plan id
    #[serde(rename = "organizaciones_por_plan", default)]
    pub organizations_per_plan: BTreeMap<String, u64>,
    #[serde(rename = "organizaciones_recientes", default)]
    pub recent_organizations: Vec<Organization>,
}

/// Move an organisation to another plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePlanRequest {
    pub plan_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_deserialize() {
        let json = r#"{
            "total_organizaciones": 12,
            "total_usuarios": 40,
            "total_facturas_mes": 900,
            "ingresos_mensuales_estimados": 149.5,
            "organizaciones_por_plan": {"gratis": 8, "pro": 4},
            "organizaciones_recientes": [{"id": "o1", "nombre": "Dalicias"}]
        }"#;
        let dashboard: AdminDashboard = serde_json::from_str(json).unwrap();
        assert_eq!(dashboard.organizations_per_plan["pro"], 4);
        assert_eq!(dashboard.recent_organizations[0].plan_id(), "gratis");
        assert_eq!(dashboard.estimated_monthly_revenue, Decimal::new(1495, 1));
    }
}
