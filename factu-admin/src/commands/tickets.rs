//! Saved open tickets

use factu_client::crud::OpenTicketsScreen;
use factu_client::{NetworkHttpClient, Notifier};

use super::{ConsoleNotifier, Context, PromptConfirmation};

async fn loaded(ctx: &Context) -> anyhow::Result<Option<OpenTicketsScreen<NetworkHttpClient, ConsoleNotifier>>> {
    ctx.require_login()?;
    let mut screen = OpenTicketsScreen::new(ctx.http.clone(), ConsoleNotifier);
    Ok(screen.load().await.then_some(screen))
}

pub async fn list(ctx: &Context) -> anyhow::Result<bool> {
    let Some(screen) = loaded(ctx).await? else {
        return Ok(false);
    };
    let tickets = screen.tickets();
    ctx.print(tickets, || {
        if tickets.is_empty() {
            println!("No open tickets");
        }
        for ticket in tickets {
            println!(
                "{:<26} {:<20} {:>10.2} {:>3} items  {}  {}",
                ticket.id,
                ticket.name,
                ticket.subtotal,
                ticket.items.len(),
                ticket.employee_name.as_deref().unwrap_or("-"),
                ticket.created_at.as_deref().unwrap_or("-"),
            );
        }
    })?;
    Ok(true)
}

pub async fn delete(ctx: &Context, id: &str, yes: bool) -> anyhow::Result<bool> {
    let Some(mut screen) = loaded(ctx).await? else {
        return Ok(false);
    };
    if !screen.tickets().iter().any(|t| t.id == id) {
        ConsoleNotifier.error(&format!("No open ticket with id {id}"));
        return Ok(false);
    }
    let deleted = screen.delete(id, &PromptConfirmation::new(yes)).await;
    if deleted {
        crate::audit_log!(ctx.user_id(), "delete", format!("open_ticket/{id}"));
    }
    Ok(deleted)
}

pub async fn clear(ctx: &Context, yes: bool) -> anyhow::Result<bool> {
    let Some(mut screen) = loaded(ctx).await? else {
        return Ok(false);
    };
    if screen.tickets().is_empty() {
        println!("No open tickets");
        return Ok(true);
    }
    let Some(report) = screen.delete_all(&PromptConfirmation::new(yes)).await else {
        return Ok(false);
    };
    crate::audit_log!(
        ctx.user_id(),
        "delete_all",
        "open_tickets",
        format!("deleted={} failed={}", report.deleted, report.failed)
    );
    Ok(report.failed == 0)
}
