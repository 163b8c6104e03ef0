//! Saved open tickets of the POS terminals

use shared::models::OpenTicket;

use super::segment;
use crate::error::ClientResult;
use crate::http::HttpClient;

const PATH: &str = "/api/tickets-abiertos-pos";

/// Outcome of deleting every open ticket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeleteReport {
    pub deleted: usize,
    pub failed: usize,
}

impl BulkDeleteReport {
    pub fn total(&self) -> usize {
        self.deleted + self.failed
    }
}

pub struct OpenTicketsApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> OpenTicketsApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<OpenTicket>> {
        self.http.get(PATH).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let path = format!("{PATH}/{}", segment(id));
        let _: serde_json::Value = self.http.delete(&path).await?;
        Ok(())
    }

    /// Delete the given tickets one after another.
    ///
    /// A failed delete is counted and the rest still run.
    pub async fn delete_all(&self, tickets: &[OpenTicket]) -> BulkDeleteReport {
        let mut report = BulkDeleteReport::default();
        for ticket in tickets {
            match self.delete(&ticket.id).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    tracing::warn!(ticket_id = %ticket.id, error = %e, "Open ticket delete failed");
                    report.failed += 1;
                }
            }
        }
        tracing::info!(deleted = report.deleted, failed = report.failed, "Open tickets cleared");
        report
    }
}
