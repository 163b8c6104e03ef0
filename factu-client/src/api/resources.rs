//! Configuration resources with list/create/update/delete endpoints
//!
//! Every configuration screen talks to a collection endpoint of the same
//! shape (`GET|POST {path}`, `PUT|DELETE {path}/{id}`). [`CrudRecord`]
//! describes one such resource and [`ResourceApi`] drives its endpoint.

use std::marker::PhantomData;

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    Category, NamedEntryDraft, OrderType, PaymentMethod, Plan, PosTerminal, PosTerminalDraft,
    PrinterGroup, PrinterGroupDraft, Store, StoreDraft, Tax, TaxDraft, TicketPreset,
    TicketPresetDraft,
};

use super::segment;
use crate::error::ClientResult;
use crate::format::{CODE_LEN, is_complete_code};
use crate::http::HttpClient;

/// A record managed through a collection endpoint
pub trait CrudRecord: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Create/update payload
    type Draft: Serialize + Clone + Default + Send + Sync;

    /// Collection endpoint
    const PATH: &'static str;
    /// Singular name used in messages
    const LABEL: &'static str;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn to_draft(&self) -> Self::Draft;

    /// Occupied or referenced; edit and delete are blocked client-side
    fn in_use(&self) -> bool {
        false
    }

    /// Draft as it is sent (trimmed, blanks dropped)
    fn normalize(draft: &Self::Draft) -> Self::Draft {
        draft.clone()
    }

    /// Reject drafts the backend would refuse
    fn validate(_draft: &Self::Draft) -> Result<(), String> {
        Ok(())
    }
}

/// Records with an active flag that can be switched from the list
pub trait Toggleable: CrudRecord {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

fn require_name(name: &str, label: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("The {label} name is required"));
    }
    Ok(())
}

/// Typed wrapper over one collection endpoint
pub struct ResourceApi<'a, R, C> {
    http: &'a C,
    _record: PhantomData<R>,
}

impl<'a, R: CrudRecord, C: HttpClient> ResourceApi<'a, R, C> {
    pub fn new(http: &'a C) -> Self {
        Self {
            http,
            _record: PhantomData,
        }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", R::PATH, segment(id))
    }

    pub async fn list(&self) -> ClientResult<Vec<R>> {
        self.http.get(R::PATH).await
    }

    pub async fn create(&self, draft: &R::Draft) -> ClientResult<()> {
        let _: serde_json::Value = self.http.post(R::PATH, draft).await?;
        tracing::info!(resource = R::LABEL, "Created");
        Ok(())
    }

    pub async fn update(&self, id: &str, draft: &R::Draft) -> ClientResult<()> {
        let _: serde_json::Value = self.http.put(&Self::item_path(id), draft).await?;
        tracing::info!(resource = R::LABEL, id, "Updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let _: serde_json::Value = self.http.delete(&Self::item_path(id)).await?;
        tracing::info!(resource = R::LABEL, id, "Deleted");
        Ok(())
    }
}

/// Product categories (read-only here, used by printer groups)
pub async fn list_categories<C: HttpClient>(http: &C) -> ClientResult<Vec<Category>> {
    http.get("/api/categorias").await
}

// =============================================================================
// Stores
// =============================================================================

impl CrudRecord for Store {
    type Draft = StoreDraft;
    const PATH: &'static str = "/api/tiendas";
    const LABEL: &'static str = "store";

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn to_draft(&self) -> StoreDraft {
        StoreDraft::from(self)
    }
    fn normalize(draft: &StoreDraft) -> StoreDraft {
        draft.normalized()
    }
    fn validate(draft: &StoreDraft) -> Result<(), String> {
        require_name(&draft.name, Self::LABEL)?;
        match draft.establishment_code.as_deref() {
            Some(code) if !is_complete_code(code) => Err(format!(
                "The establishment code must have {CODE_LEN} digits"
            )),
            _ => Ok(()),
        }
    }
}

impl Toggleable for Store {
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

// =============================================================================
// POS terminals
// =============================================================================

impl CrudRecord for PosTerminal {
    type Draft = PosTerminalDraft;
    const PATH: &'static str = "/api/tpv";
    const LABEL: &'static str = "terminal";

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn to_draft(&self) -> PosTerminalDraft {
        PosTerminalDraft::from(self)
    }
    fn in_use(&self) -> bool {
        self.occupied
    }
    fn normalize(draft: &PosTerminalDraft) -> PosTerminalDraft {
        draft.normalized()
    }
    fn validate(draft: &PosTerminalDraft) -> Result<(), String> {
        require_name(&draft.name, Self::LABEL)?;
        if !is_complete_code(&draft.emission_point) {
            return Err(format!("The emission point must have {CODE_LEN} digits"));
        }
        if draft.store_id.is_empty() {
            return Err("Select the store of the terminal".into());
        }
        Ok(())
    }
}

impl Toggleable for PosTerminal {
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

// =============================================================================
// Taxes
// =============================================================================

impl CrudRecord for Tax {
    type Draft = TaxDraft;
    const PATH: &'static str = "/api/impuestos";
    const LABEL: &'static str = "tax";

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn to_draft(&self) -> TaxDraft {
        TaxDraft::from(self)
    }
    fn normalize(draft: &TaxDraft) -> TaxDraft {
        TaxDraft {
            name: draft.name.trim().to_string(),
            ..draft.clone()
        }
    }
    fn validate(draft: &TaxDraft) -> Result<(), String> {
        require_name(&draft.name, Self::LABEL)?;
        if draft.rate < Decimal::ZERO || draft.rate > Decimal::ONE_HUNDRED {
            return Err("The tax rate must be between 0 and 100".into());
        }
        Ok(())
    }
}

impl Toggleable for Tax {
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

// =============================================================================
// Payment methods and order types
// =============================================================================

fn normalize_named(draft: &NamedEntryDraft) -> NamedEntryDraft {
    NamedEntryDraft {
        name: draft.name.trim().to_string(),
        is_active: draft.is_active,
    }
}

impl CrudRecord for PaymentMethod {
    type Draft = NamedEntryDraft;
    const PATH: &'static str = "/api/metodos-pago";
    const LABEL: &'static str = "payment method";

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn to_draft(&self) -> NamedEntryDraft {
        NamedEntryDraft::from(self)
    }
    fn normalize(draft: &NamedEntryDraft) -> NamedEntryDraft {
        normalize_named(draft)
    }
    fn validate(draft: &NamedEntryDraft) -> Result<(), String> {
        require_name(&draft.name, Self::LABEL)
    }
}

impl Toggleable for PaymentMethod {
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl CrudRecord for OrderType {
    type Draft = NamedEntryDraft;
    const PATH: &'static str = "/api/tipos-pedido";
    const LABEL: &'static str = "order type";

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn to_draft(&self) -> NamedEntryDraft {
        NamedEntryDraft::from(self)
    }
    fn normalize(draft: &NamedEntryDraft) -> NamedEntryDraft {
        normalize_named(draft)
    }
    fn validate(draft: &NamedEntryDraft) -> Result<(), String> {
        require_name(&draft.name, Self::LABEL)
    }
}

impl Toggleable for OrderType {
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

// =============================================================================
// Open-ticket presets and printer groups
// =============================================================================

impl CrudRecord for TicketPreset {
    type Draft = TicketPresetDraft;
    const PATH: &'static str = "/api/tickets-predefinidos";
    const LABEL: &'static str = "ticket preset";

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn to_draft(&self) -> TicketPresetDraft {
        TicketPresetDraft::from(self)
    }
    fn normalize(draft: &TicketPresetDraft) -> TicketPresetDraft {
        TicketPresetDraft {
            name: draft.name.trim().to_string(),
        }
    }
    fn validate(draft: &TicketPresetDraft) -> Result<(), String> {
        require_name(&draft.name, Self::LABEL)
    }
}

impl CrudRecord for PrinterGroup {
    type Draft = PrinterGroupDraft;
    const PATH: &'static str = "/api/grupos-impresora";
    const LABEL: &'static str = "printer group";

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn to_draft(&self) -> PrinterGroupDraft {
        PrinterGroupDraft::from(self)
    }
    fn normalize(draft: &PrinterGroupDraft) -> PrinterGroupDraft {
        PrinterGroupDraft {
            name: draft.name.trim().to_string(),
            categories: draft.categories.clone(),
        }
    }
    fn validate(draft: &PrinterGroupDraft) -> Result<(), String> {
        require_name(&draft.name, Self::LABEL)
    }
}

// =============================================================================
// Plans (super-admin)
// =============================================================================

impl CrudRecord for Plan {
    type Draft = Plan;
    const PATH: &'static str = "/api/superadmin/planes";
    const LABEL: &'static str = "plan";

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn to_draft(&self) -> Plan {
        self.clone()
    }
    fn normalize(draft: &Plan) -> Plan {
        Plan {
            id: draft.id.trim().to_lowercase(),
            name: draft.name.trim().to_string(),
            ..draft.clone()
        }
    }
    fn validate(draft: &Plan) -> Result<(), String> {
        if draft.id.trim().is_empty() {
            return Err("The plan id is required".into());
        }
        require_name(&draft.name, Self::LABEL)?;
        if draft.price < Decimal::ZERO {
            return Err("The plan price cannot be negative".into());
        }
        Ok(())
    }
}

impl Toggleable for Plan {
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_validation() {
        let mut draft = PosTerminalDraft {
            name: "Caja 1".into(),
            emission_point: "001".into(),
            store_id: "t1".into(),
            is_active: true,
        };
        assert!(PosTerminal::validate(&draft).is_ok());

        draft.emission_point = "01".into();
        assert!(PosTerminal::validate(&draft).is_err());

        draft.emission_point = "001".into();
        draft.store_id.clear();
        assert!(PosTerminal::validate(&draft).is_err());
    }

    #[test]
    fn test_store_code_optional() {
        let mut draft = StoreDraft {
            name: "Centro".into(),
            ..Default::default()
        };
        assert!(Store::validate(&draft).is_ok());

        draft.establishment_code = Some("12".into());
        assert!(Store::validate(&draft).is_err());
        draft.establishment_code = Some("012".into());
        assert!(Store::validate(&draft).is_ok());
    }

    #[test]
    fn test_tax_rate_bounds() {
        let draft = TaxDraft {
            name: "IVA".into(),
            rate: Decimal::new(15, 0),
            ..Default::default()
        };
        assert!(Tax::validate(&draft).is_ok());

        let too_high = TaxDraft {
            rate: Decimal::new(101, 0),
            ..draft
        };
        assert!(Tax::validate(&too_high).is_err());
    }

    #[test]
    fn test_blank_names_rejected() {
        let draft = NamedEntryDraft {
            name: "   ".into(),
            is_active: true,
        };
        assert_eq!(
            PaymentMethod::validate(&draft),
            Err("The payment method name is required".to_string())
        );
    }

    #[test]
    fn test_plan_normalize() {
        let draft = Plan {
            id: " Premium ".into(),
            name: " Premium ".into(),
            ..Default::default()
        };
        let normalized = Plan::normalize(&draft);
        assert_eq!(normalized.id, "premium");
        assert_eq!(normalized.name, "Premium");
        assert!(Plan::validate(&normalized).is_ok());
    }
}
