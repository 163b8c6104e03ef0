//! Plans, usage and subscription billing

use factu_client::api::{PlansApi, SubscriptionApi};
use factu_client::usage::upgrade_candidates;
use factu_client::{Confirmation, Notifier, PlanAction, PollState, StatusPoller, UsageBand, UsageReport};
use shared::models::{Plan, PlanCapability, PlanResource};
use tokio_util::sync::CancellationToken;

use super::{ConsoleNotifier, Context, PromptConfirmation, mark};

const BAR_WIDTH: usize = 20;

fn price_line(plan: &Plan) -> String {
    format!("{} {:.2}/{}", plan.currency, plan.price, plan.period)
}

pub async fn catalog(ctx: &Context) -> anyhow::Result<bool> {
    let plans = PlansApi::new(&ctx.http).catalog().await?;
    ctx.print(&plans, || {
        for plan in plans.iter().filter(|p| p.is_active && p.visible_en_web) {
            let featured = if plan.is_featured { "  *featured*" } else { "" };
            println!("{:<12} {:<16} {}{}", plan.id, plan.name, price_line(plan), featured);
            for resource in PlanResource::ALL {
                println!(
                    "    {:<20} {}",
                    resource.label(),
                    factu_client::usage::format_limit(plan.limits().get(resource))
                );
            }
            let enabled: Vec<&str> = plan.capabilities.enabled().map(|c| c.label()).collect();
            if !enabled.is_empty() {
                println!("    {}", enabled.join(", "));
            }
        }
    })?;
    Ok(true)
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub async fn my_plan(ctx: &Context) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let plan = PlansApi::new(&ctx.http).my_plan().await?;

    // Subscription and catalog only refine the screen; their failures are not fatal
    let subscription = match SubscriptionApi::new(&ctx.http).current().await {
        Ok(sub) => Some(sub),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load subscription");
            None
        }
    };
    let catalog = PlansApi::new(&ctx.http).catalog().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load plan catalog");
        Vec::new()
    });

    let report = UsageReport::from_plan(&plan);
    let action = PlanAction::resolve(&plan, subscription.as_ref());
    let upgrades = upgrade_candidates(&catalog, plan.plan_price);

    let json = serde_json::json!({
        "plan": plan,
        "subscription": subscription,
        "upgrades": upgrades,
    });
    ctx.print(&json, || {
        println!("{} ({:.2}/{})", plan.plan_name, plan.plan_price, plan.plan_period);
        for usage in &report.resources {
            let flag = match usage.band {
                UsageBand::Nominal => "",
                UsageBand::Warning => " !",
                UsageBand::Critical => " !!",
            };
            let alert = usage.alert.map(|a| format!("  {}", a.label())).unwrap_or_default();
            println!(
                "  {:<20} {} {:>14}{}{}",
                usage.resource.label(),
                bar(usage.percent),
                usage.summary(),
                flag,
                alert
            );
        }
        if report.near_limit {
            println!("You are close to the limits of your plan.");
        }

        for capability in PlanCapability::ALL {
            println!("  {:<22} {}", capability.label(), mark(plan.capabilities.has(capability)));
        }

        if let Some(sub) = &subscription
            && sub.has_subscription
        {
            let status = sub.status.map(|s| s.label()).unwrap_or("Unknown");
            print!("Subscription: {status}");
            if let Some(end) = &sub.current_period_end {
                print!(", period ends {end}");
            }
            if sub.cancel_at_period_end {
                print!(" (cancelled)");
            }
            println!();
        }

        println!("Next: {}", action.label());
        for candidate in &upgrades {
            println!("  {:<12} {:<16} {}", candidate.id, candidate.name, price_line(candidate));
        }
    })?;
    Ok(true)
}

pub async fn subscription(ctx: &Context) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let sub = SubscriptionApi::new(&ctx.http).current().await?;
    ctx.print(&sub, || {
        if !sub.has_subscription {
            println!("No active subscription");
            return;
        }
        println!("Status:         {}", sub.status.map(|s| s.label()).unwrap_or("Unknown"));
        if let Some(plan) = &sub.plan_id {
            println!("Plan:           {plan}");
        }
        if let Some(end) = &sub.current_period_end {
            println!("Period end:     {end}");
        }
        if let Some(days) = sub.days_remaining {
            println!("Days remaining: {days}");
        }
        println!("Cancels at end: {}", mark(sub.cancel_at_period_end));
    })?;
    Ok(true)
}

pub async fn checkout(ctx: &Context, plan_id: &str, origin: &str) -> anyhow::Result<bool> {
    ctx.require_login()?;
    match SubscriptionApi::new(&ctx.http)
        .create_checkout(plan_id, origin)
        .await
    {
        Ok(checkout) => {
            ctx.print(&checkout, || {
                if let Some(url) = &checkout.checkout_url {
                    println!("Open this URL to pay:\n{url}");
                }
                if let Some(session) = &checkout.session_id {
                    println!("Then run: factu-admin subscription verify {session}");
                }
            })?;
            Ok(true)
        }
        Err(e) => {
            ConsoleNotifier.error(&e.user_message("Error creating the checkout session"));
            Ok(false)
        }
    }
}

/// Poll a checkout session until it settles; Ctrl-C stops the wait
pub async fn verify(ctx: &Context, session_id: &str) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let notifier = ConsoleNotifier;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let poller = StatusPoller::from_config(&ctx.config);
    let mut states = poller.subscribe();
    let progress = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            if let PollState::Checking { attempt } = state {
                eprintln!("Checking payment status (attempt {attempt})...");
            }
        }
    });

    let source = SubscriptionApi::new(&ctx.http);
    let outcome = poller.run(&source, Some(session_id), &cancel).await;
    progress.abort();

    let ok = match outcome {
        Some(PollState::Success { plan_id }) => {
            match plan_id {
                Some(plan) => notifier.success(&format!("Payment confirmed; plan {plan} is now active")),
                None => notifier.success("Payment confirmed"),
            }
            true
        }
        Some(PollState::Expired) => {
            notifier.error("The checkout session expired without payment");
            false
        }
        Some(PollState::Pending) => {
            notifier.error(&format!(
                "Payment not confirmed yet; it may take a few minutes. Check again with `factu-admin subscription verify {session_id}`"
            ));
            false
        }
        Some(PollState::Error { message }) => {
            notifier.error(&message);
            false
        }
        Some(PollState::Checking { .. }) | None => {
            eprintln!("Stopped");
            false
        }
    };
    Ok(ok)
}

pub async fn cancel(ctx: &Context, yes: bool) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let confirm = PromptConfirmation::new(yes);
    if !confirm.confirm("Cancel the subscription? It stays active until the end of the paid period.") {
        return Ok(false);
    }
    match SubscriptionApi::new(&ctx.http).cancel().await {
        Ok(ack) => {
            crate::audit_log!(ctx.user_id(), "cancel_subscription", "subscription");
            ConsoleNotifier.success(non_empty(&ack.message, "Subscription cancelled"));
            Ok(true)
        }
        Err(e) => {
            ConsoleNotifier.error(&e.user_message("Error cancelling the subscription"));
            Ok(false)
        }
    }
}

pub async fn reactivate(ctx: &Context) -> anyhow::Result<bool> {
    ctx.require_login()?;
    match SubscriptionApi::new(&ctx.http).reactivate().await {
        Ok(ack) => {
            ConsoleNotifier.success(non_empty(&ack.message, "Subscription reactivated"));
            Ok(true)
        }
        Err(e) => {
            ConsoleNotifier.error(&e.user_message("Error reactivating the subscription"));
            Ok(false)
        }
    }
}

pub async fn payments(ctx: &Context) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let payments = SubscriptionApi::new(&ctx.http).payments().await?;
    ctx.print(&payments, || {
        if payments.is_empty() {
            println!("No payments yet");
        }
        for p in &payments {
            println!(
                "{:<20} {:>10.2} {:<4} {:<12} {}",
                p.created_at.as_deref().unwrap_or("-"),
                p.amount,
                p.currency.as_deref().unwrap_or("").to_uppercase(),
                p.status.as_deref().unwrap_or("-"),
                p.kind.as_deref().unwrap_or("-"),
            );
        }
    })?;
    Ok(true)
}

fn non_empty<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.trim().is_empty() { fallback } else { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar(0.0), format!("[{}]", ".".repeat(BAR_WIDTH)));
        assert_eq!(bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(50.0).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_non_empty_fallback() {
        assert_eq!(non_empty("  ", "Done"), "Done");
        assert_eq!(non_empty("Cancelada", "Done"), "Cancelada");
    }
}
