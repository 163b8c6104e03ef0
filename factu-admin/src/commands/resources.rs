//! list / create / update / toggle / delete over configuration resources

use anyhow::{Context as _, bail};
use factu_client::api::{CrudRecord, PlansApi, ResourceApi, Toggleable, list_categories};
use factu_client::{CrudScreen, NetworkHttpClient, Notifier, ToggleState};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{
    OrderType, PaymentMethod, Plan, PlanResource, PosTerminal, PrinterGroup, Store, Tax,
    TicketPreset,
};

use super::{ConsoleNotifier, Context, PromptConfirmation, ResourceKind, mark};

type Screen<R> = CrudScreen<R, NetworkHttpClient, ConsoleNotifier>;

/// One line of `list` output, after the id column
trait Row {
    fn row(&self) -> String;
}

impl Row for Store {
    fn row(&self) -> String {
        format!(
            "{:<24} est {:<4} active {}",
            self.name,
            self.establishment_code.as_deref().unwrap_or("-"),
            mark(self.is_active)
        )
    }
}

impl Row for PosTerminal {
    fn row(&self) -> String {
        let mut line = format!(
            "{:<24} {:<4} {:<20} active {:<3}",
            self.name,
            self.emission_point,
            self.store_name.as_deref().unwrap_or(&self.store_id),
            mark(self.is_active)
        );
        if self.occupied {
            line.push_str(&format!(
                "  occupied by {}",
                self.occupied_by.as_deref().unwrap_or("?")
            ));
        }
        line
    }
}

impl Row for Tax {
    fn row(&self) -> String {
        format!(
            "{:<24} {:>6}% {:<10} active {}",
            self.name,
            self.rate,
            self.kind.label(),
            mark(self.is_active)
        )
    }
}

impl Row for PaymentMethod {
    fn row(&self) -> String {
        format!("{:<24} active {}", self.name, mark(self.is_active))
    }
}

impl Row for OrderType {
    fn row(&self) -> String {
        format!("{:<24} active {}", self.name, mark(self.is_active))
    }
}

impl Row for TicketPreset {
    fn row(&self) -> String {
        self.name.clone()
    }
}

impl Row for PrinterGroup {
    fn row(&self) -> String {
        format!("{:<24} {} categories", self.name, self.categories.len())
    }
}

impl Row for Plan {
    fn row(&self) -> String {
        format!(
            "{:<16} {} {:.2}  order {:<3} visible {:<3} active {}",
            self.name,
            self.currency,
            self.price,
            self.sort_order,
            mark(self.visible_en_web),
            mark(self.is_active)
        )
    }
}

macro_rules! for_kind {
    ($kind:expr, $f:ident($($arg:expr),*)) => {
        match $kind {
            ResourceKind::Stores => $f::<Store>($($arg),*).await,
            ResourceKind::Terminals => $f::<PosTerminal>($($arg),*).await,
            ResourceKind::Taxes => $f::<Tax>($($arg),*).await,
            ResourceKind::PaymentMethods => $f::<PaymentMethod>($($arg),*).await,
            ResourceKind::OrderTypes => $f::<OrderType>($($arg),*).await,
            ResourceKind::TicketPresets => $f::<TicketPreset>($($arg),*).await,
            ResourceKind::PrinterGroups => $f::<PrinterGroup>($($arg),*).await,
            ResourceKind::Plans => $f::<Plan>($($arg),*).await,
        }
    };
}

/// Screen with its list loaded, `None` when loading failed (already reported)
async fn loaded<R: CrudRecord>(ctx: &Context) -> anyhow::Result<Option<Screen<R>>> {
    ctx.require_login()?;
    let mut screen = CrudScreen::new(ctx.http.clone(), ConsoleNotifier);
    Ok(screen.load().await.then_some(screen))
}

fn missing<R: CrudRecord>(id: &str) -> bool {
    ConsoleNotifier.error(&format!("No {} with id {id}", R::LABEL));
    false
}

/// Overlay the fields of a JSON object on a draft
fn merge_draft<D: Serialize + DeserializeOwned>(base: &D, body: &str) -> anyhow::Result<D> {
    let patch: Value = serde_json::from_str(body).context("--json-body is not valid JSON")?;
    let Value::Object(fields) = patch else {
        bail!("--json-body must be a JSON object");
    };
    let mut value = serde_json::to_value(base)?;
    if let Value::Object(target) = &mut value {
        target.extend(fields);
    }
    serde_json::from_value(value).context("--json-body does not match the record's fields")
}

pub async fn list(ctx: &Context, kind: ResourceKind) -> anyhow::Result<bool> {
    for_kind!(kind, list_records(ctx))
}

async fn list_records<R: CrudRecord + Serialize + Row>(ctx: &Context) -> anyhow::Result<bool> {
    let Some(screen) = loaded::<R>(ctx).await? else {
        return Ok(false);
    };
    ctx.print(screen.items(), || {
        if screen.items().is_empty() {
            println!("No {}s", R::LABEL);
        }
        for record in screen.items() {
            println!("{:<26} {}", record.id(), record.row());
        }
    })?;
    Ok(true)
}

pub async fn create(ctx: &Context, kind: ResourceKind, body: &str) -> anyhow::Result<bool> {
    match kind {
        ResourceKind::Terminals => create_terminal(ctx, body).await,
        _ => for_kind!(kind, create_record(ctx, body)),
    }
}

async fn create_record<R>(ctx: &Context, body: &str) -> anyhow::Result<bool>
where
    R: CrudRecord,
    R::Draft: DeserializeOwned,
{
    ctx.require_login()?;
    let mut screen: Screen<R> = CrudScreen::new(ctx.http.clone(), ConsoleNotifier);
    screen.open_create();
    submit_merged(&mut screen, body).await
}

/// Terminals are metered: the plan limit is checked before the dialog opens
async fn create_terminal(ctx: &Context, body: &str) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let check = PlansApi::new(&ctx.http)
        .check_limit(PlanResource::Terminals)
        .await;
    if !check.can_create {
        ConsoleNotifier.error(if check.message.is_empty() {
            "Your plan does not allow more points of sale"
        } else {
            check.message.as_str()
        });
        return Ok(false);
    }

    let Some(mut screen) = loaded::<PosTerminal>(ctx).await? else {
        return Ok(false);
    };
    let stores = ResourceApi::<Store, _>::new(&ctx.http)
        .list()
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load stores");
            Vec::new()
        });
    screen.open_create_terminal(&stores);
    submit_merged(&mut screen, body).await
}

async fn submit_merged<R>(screen: &mut Screen<R>, body: &str) -> anyhow::Result<bool>
where
    R: CrudRecord,
    R::Draft: DeserializeOwned,
{
    let Some(draft) = screen.draft_mut() else {
        return Ok(false);
    };
    *draft = merge_draft(draft, body)?;
    Ok(screen.submit().await)
}

pub async fn update(ctx: &Context, kind: ResourceKind, id: &str, body: &str) -> anyhow::Result<bool> {
    for_kind!(kind, update_record(ctx, id, body))
}

async fn update_record<R>(ctx: &Context, id: &str, body: &str) -> anyhow::Result<bool>
where
    R: CrudRecord,
    R::Draft: DeserializeOwned,
{
    let Some(mut screen) = loaded::<R>(ctx).await? else {
        return Ok(false);
    };
    if !screen.open_edit(id) {
        return Ok(false);
    }
    submit_merged(&mut screen, body).await
}

pub async fn toggle(ctx: &Context, kind: ResourceKind, id: &str) -> anyhow::Result<bool> {
    match kind {
        ResourceKind::Stores => toggle_record::<Store>(ctx, id).await,
        ResourceKind::Terminals => toggle_record::<PosTerminal>(ctx, id).await,
        ResourceKind::Taxes => toggle_record::<Tax>(ctx, id).await,
        ResourceKind::PaymentMethods => toggle_record::<PaymentMethod>(ctx, id).await,
        ResourceKind::OrderTypes => toggle_record::<OrderType>(ctx, id).await,
        ResourceKind::Plans => toggle_record::<Plan>(ctx, id).await,
        ResourceKind::TicketPresets | ResourceKind::PrinterGroups => {
            bail!("{kind:?} have no active flag")
        }
    }
}

async fn toggle_record<R: Toggleable>(ctx: &Context, id: &str) -> anyhow::Result<bool> {
    let Some(mut screen) = loaded::<R>(ctx).await? else {
        return Ok(false);
    };
    let name = match screen.find(id) {
        Some(record) => record.name().to_string(),
        None => return Ok(missing::<R>(id)),
    };
    match screen.toggle_active(id).await {
        Some(ToggleState::Committed { active, .. }) => {
            let verb = if active { "activated" } else { "deactivated" };
            ConsoleNotifier.success(&format!("\"{name}\" {verb}"));
            Ok(true)
        }
        _ => Ok(false),
    }
}

pub async fn delete(ctx: &Context, kind: ResourceKind, id: &str, yes: bool) -> anyhow::Result<bool> {
    for_kind!(kind, delete_record(ctx, id, yes))
}

async fn delete_record<R: CrudRecord>(ctx: &Context, id: &str, yes: bool) -> anyhow::Result<bool> {
    let Some(mut screen) = loaded::<R>(ctx).await? else {
        return Ok(false);
    };
    if screen.find(id).is_none() {
        return Ok(missing::<R>(id));
    }
    let deleted = screen.delete(id, &PromptConfirmation::new(yes)).await;
    if deleted {
        crate::audit_log!(ctx.user_id(), "delete", format!("{}/{id}", R::PATH));
    }
    Ok(deleted)
}

pub async fn categories(ctx: &Context) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let categories = list_categories(&ctx.http).await?;
    ctx.print(&categories, || {
        for category in &categories {
            println!("{:<26} {}", category.id, category.name);
        }
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::StoreDraft;

    #[test]
    fn test_merge_draft_overlays_fields() {
        let base = StoreDraft {
            name: "Centro".into(),
            ..Default::default()
        };
        let merged = merge_draft(&base, r#"{"telefono": "0999", "activa": false}"#).unwrap();
        assert_eq!(merged.name, "Centro");
        assert_eq!(merged.phone.as_deref(), Some("0999"));
        assert!(!merged.is_active);
    }

    #[test]
    fn test_merge_draft_rejects_non_objects() {
        let base = StoreDraft::default();
        assert!(merge_draft(&base, "[1, 2]").is_err());
        assert!(merge_draft(&base, "not json").is_err());
        assert!(merge_draft(&base, r#"{"activa": "maybe"}"#).is_err());
    }
}
