//! Open tickets admin screen

use shared::models::OpenTicket;
use tokio_util::sync::CancellationToken;

use super::{Confirmation, Notifier, guarded};
use crate::api::{BulkDeleteReport, OpenTicketsApi};
use crate::http::HttpClient;

pub struct OpenTicketsScreen<C, N> {
    http: C,
    notifier: N,
    tickets: Vec<OpenTicket>,
    lifetime: CancellationToken,
}

impl<C: HttpClient, N: Notifier> OpenTicketsScreen<C, N> {
    pub fn new(http: C, notifier: N) -> Self {
        Self {
            http,
            notifier,
            tickets: Vec::new(),
            lifetime: CancellationToken::new(),
        }
    }

    pub fn with_lifetime(mut self, parent: &CancellationToken) -> Self {
        self.lifetime = parent.child_token();
        self
    }

    pub fn tickets(&self) -> &[OpenTicket] {
        &self.tickets
    }

    pub fn is_closed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    pub fn close(&self) {
        self.lifetime.cancel();
    }

    pub async fn load(&mut self) -> bool {
        let api = OpenTicketsApi::new(&self.http);
        let Some(result) = guarded(&self.lifetime, api.list()).await else {
            return false;
        };
        match result {
            Ok(tickets) => {
                self.tickets = tickets;
                true
            }
            Err(e) => {
                self.tickets.clear();
                self.notifier
                    .error(&e.user_message("Error loading open tickets"));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &str, confirm: &impl Confirmation) -> bool {
        let Some(ticket) = self.tickets.iter().find(|t| t.id == id) else {
            self.notifier.error("The open ticket no longer exists");
            return false;
        };
        if !confirm.confirm(&format!("Delete open ticket \"{}\"?", ticket.name)) {
            return false;
        }
        let api = OpenTicketsApi::new(&self.http);
        let Some(result) = guarded(&self.lifetime, api.delete(id)).await else {
            return false;
        };
        match result {
            Ok(()) => {
                self.notifier.success("Open ticket deleted");
                self.load().await;
                true
            }
            Err(e) => {
                self.notifier
                    .error(&e.user_message("Error deleting the open ticket"));
                false
            }
        }
    }

    /// Delete every listed ticket, one at a time.
    ///
    /// `None` when there is nothing to delete, the user declines or the
    /// screen closes before the batch finishes.
    pub async fn delete_all(&mut self, confirm: &impl Confirmation) -> Option<BulkDeleteReport> {
        if self.tickets.is_empty() {
            return None;
        }
        let prompt = format!("Delete all {} open tickets?", self.tickets.len());
        if !confirm.confirm(&prompt) {
            return None;
        }

        let api = OpenTicketsApi::new(&self.http);
        let report = guarded(&self.lifetime, api.delete_all(&self.tickets)).await?;
        if report.failed == 0 {
            self.notifier
                .success(&format!("{} open tickets deleted", report.deleted));
        } else {
            self.notifier.error(&format!(
                "{} of {} open tickets could not be deleted",
                report.failed,
                report.total()
            ));
        }
        self.load().await;
        Some(report)
    }
}
