//! Generic list/dialog/toggle/delete screen

use shared::models::{PosTerminal, PrinterGroup, Store};
use tokio_util::sync::CancellationToken;

use super::{Confirmation, Notifier, ToggleState, guarded};
use crate::api::{CrudRecord, ResourceApi, Toggleable};
use crate::format::suggest_next_code;
use crate::http::HttpClient;

/// Create/edit dialog
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog<D> {
    /// Id of the record being edited, `None` when creating
    pub editing: Option<String>,
    pub draft: D,
    /// Last submit error shown inside the dialog
    pub error: Option<String>,
}

impl<D> Dialog<D> {
    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }
}

/// State of one configuration screen over records of type `R`
pub struct CrudScreen<R: CrudRecord, C, N> {
    http: C,
    notifier: N,
    items: Vec<R>,
    dialog: Option<Dialog<R::Draft>>,
    last_toggle: Option<ToggleState>,
    lifetime: CancellationToken,
}

impl<R, C, N> CrudScreen<R, C, N>
where
    R: CrudRecord,
    C: HttpClient,
    N: Notifier,
{
    pub fn new(http: C, notifier: N) -> Self {
        Self {
            http,
            notifier,
            items: Vec::new(),
            dialog: None,
            last_toggle: None,
            lifetime: CancellationToken::new(),
        }
    }

    /// Bind the screen to an outer lifetime (closing the parent closes it)
    pub fn with_lifetime(mut self, parent: &CancellationToken) -> Self {
        self.lifetime = parent.child_token();
        self
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn dialog(&self) -> Option<&Dialog<R::Draft>> {
        self.dialog.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        self.dialog.as_mut().map(|d| &mut d.draft)
    }

    pub fn last_toggle(&self) -> Option<&ToggleState> {
        self.last_toggle.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    /// Close the screen; requests still in flight are discarded
    pub fn close(&self) {
        self.lifetime.cancel();
    }

    fn api(&self) -> ResourceApi<'_, R, C> {
        ResourceApi::new(&self.http)
    }

    /// Fetch the list. On failure the list is left empty.
    pub async fn load(&mut self) -> bool {
        let Some(result) = guarded(&self.lifetime, self.api().list()).await else {
            return false;
        };
        match result {
            Ok(items) => {
                tracing::debug!(resource = R::LABEL, count = items.len(), "List loaded");
                self.items = items;
                true
            }
            Err(e) => {
                self.items.clear();
                self.notifier
                    .error(&e.user_message(&format!("Error loading {}s", R::LABEL)));
                false
            }
        }
    }

    pub fn open_create(&mut self) {
        self.open_create_with(R::Draft::default());
    }

    pub fn open_create_with(&mut self, draft: R::Draft) {
        self.dialog = Some(Dialog {
            editing: None,
            draft,
            error: None,
        });
    }

    /// Open the edit dialog; refused for unknown or in-use records
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.find(id) else {
            self.notifier.error(&format!("The {} no longer exists", R::LABEL));
            return false;
        };
        if record.in_use() {
            self.notifier.error(&format!(
                "The {} \"{}\" is in use and cannot be edited",
                R::LABEL,
                record.name()
            ));
            return false;
        }
        let draft = record.to_draft();
        self.dialog = Some(Dialog {
            editing: Some(id.to_string()),
            draft,
            error: None,
        });
        true
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    /// Send the dialog's draft.
    ///
    /// Success closes the dialog and reloads the list. Failure keeps the
    /// dialog open with the error.
    pub async fn submit(&mut self) -> bool {
        let Some(dialog) = self.dialog.as_ref() else {
            return false;
        };
        let draft = R::normalize(&dialog.draft);
        let editing = dialog.editing.clone();

        if let Err(message) = R::validate(&draft) {
            self.fail_dialog(message);
            return false;
        }

        let request = async {
            match editing.as_deref() {
                Some(id) => self.api().update(id, &draft).await,
                None => self.api().create(&draft).await,
            }
        };
        let Some(result) = guarded(&self.lifetime, request).await else {
            return false;
        };

        match result {
            Ok(()) => {
                self.dialog = None;
                let verb = if editing.is_some() { "updated" } else { "created" };
                self.notifier
                    .success(&format!("{} {verb}", capitalize(R::LABEL)));
                self.load().await;
                true
            }
            Err(e) => {
                self.fail_dialog(e.user_message(&format!("Error saving {}", R::LABEL)));
                false
            }
        }
    }

    fn fail_dialog(&mut self, message: String) {
        self.notifier.error(&message);
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.error = Some(message);
        }
    }

    /// Delete after confirmation; in-use records are refused
    pub async fn delete(&mut self, id: &str, confirm: &impl Confirmation) -> bool {
        let Some(record) = self.find(id) else {
            self.notifier.error(&format!("The {} no longer exists", R::LABEL));
            return false;
        };
        if record.in_use() {
            self.notifier.error(&format!(
                "The {} \"{}\" is in use and cannot be deleted",
                R::LABEL,
                record.name()
            ));
            return false;
        }
        let prompt = format!("Delete {} \"{}\"?", R::LABEL, record.name());
        if !confirm.confirm(&prompt) {
            return false;
        }

        let Some(result) = guarded(&self.lifetime, self.api().delete(id)).await else {
            return false;
        };
        match result {
            Ok(()) => {
                self.notifier
                    .success(&format!("{} deleted", capitalize(R::LABEL)));
                self.load().await;
                true
            }
            Err(e) => {
                self.notifier
                    .error(&e.user_message(&format!("Error deleting {}", R::LABEL)));
                false
            }
        }
    }
}

impl<R, C, N> CrudScreen<R, C, N>
where
    R: Toggleable,
    C: HttpClient,
    N: Notifier,
{
    /// Flip the active flag locally and persist it.
    ///
    /// A failed PUT restores the previous value. Returns the settled state,
    /// or `None` for an unknown id or a closed screen.
    pub async fn toggle_active(&mut self, id: &str) -> Option<ToggleState> {
        let index = self.items.iter().position(|r| r.id() == id)?;

        let previous = self.items[index].is_active();
        self.items[index].set_active(!previous);
        let mut state = ToggleState::begin(id, previous);
        self.last_toggle = Some(state.clone());

        let draft = self.items[index].to_draft();
        let result = guarded(&self.lifetime, self.api().update(id, &draft)).await?;

        state = match result {
            Ok(()) => state.commit(),
            Err(e) => {
                self.items[index].set_active(previous);
                self.notifier
                    .error(&e.user_message(&format!("Error updating {}", R::LABEL)));
                state.rollback()
            }
        };
        self.last_toggle = Some(state.clone());
        Some(state)
    }
}

impl<C: HttpClient, N: Notifier> CrudScreen<PosTerminal, C, N> {
    /// New-terminal dialog with the next emission point and the first store
    pub fn open_create_terminal(&mut self, stores: &[Store]) {
        let mut draft = <PosTerminal as CrudRecord>::Draft::default();
        draft.emission_point = suggest_next_code(self.items.len());
        if let Some(store) = stores.first() {
            draft.store_id = store.id.clone();
        }
        self.open_create_with(draft);
    }
}

impl<C: HttpClient, N: Notifier> CrudScreen<PrinterGroup, C, N> {
    /// Add or remove a category in the open dialog
    pub fn toggle_category(&mut self, category_id: &str) {
        if let Some(draft) = self.draft_mut() {
            draft.toggle_category(category_id);
        }
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
