//! Super-admin panel

use factu_client::api::SuperAdminApi;
use factu_client::{Confirmation, Notifier};

use super::{ConsoleNotifier, Context, PromptConfirmation};

fn require_superadmin(ctx: &Context) -> anyhow::Result<()> {
    ctx.require_login()?;
    // Profile is cached; the backend still checks the role
    if let Some(user) = ctx.session.user()
        && !user.is_superadmin()
    {
        anyhow::bail!("This command requires the superadmin role");
    }
    Ok(())
}

pub async fn dashboard(ctx: &Context) -> anyhow::Result<bool> {
    require_superadmin(ctx)?;
    let dashboard = SuperAdminApi::new(&ctx.http).dashboard().await?;
    ctx.print(&dashboard, || {
        println!("Organisations:        {}", dashboard.total_organizations);
        println!("Users:                {}", dashboard.total_users);
        println!("Invoices this month:  {}", dashboard.invoices_this_month);
        println!("Est. monthly revenue: {:.2}", dashboard.estimated_monthly_revenue);
        for (plan, count) in &dashboard.organizations_per_plan {
            println!("  {plan:<12} {count}");
        }
        if !dashboard.recent_organizations.is_empty() {
            println!("Recent:");
            for org in &dashboard.recent_organizations {
                println!("  {:<26} {:<24} {}", org.id, org.name, org.plan_id());
            }
        }
    })?;
    Ok(true)
}

pub async fn organizations(ctx: &Context) -> anyhow::Result<bool> {
    require_superadmin(ctx)?;
    let orgs = SuperAdminApi::new(&ctx.http).organizations().await?;
    ctx.print(&orgs, || {
        for org in &orgs {
            println!(
                "{:<26} {:<24} {:<10} {:<28} {}",
                org.id,
                org.name,
                org.plan_id(),
                org.owner_email.as_deref().or(org.email.as_deref()).unwrap_or("-"),
                org.last_activity.as_deref().unwrap_or("-"),
            );
        }
    })?;
    Ok(true)
}

pub async fn change_plan(
    ctx: &Context,
    organization_id: &str,
    plan_id: &str,
    yes: bool,
) -> anyhow::Result<bool> {
    require_superadmin(ctx)?;
    let prompt = format!("Move organisation {organization_id} to plan {plan_id}?");
    if !PromptConfirmation::new(yes).confirm(&prompt) {
        return Ok(false);
    }
    match SuperAdminApi::new(&ctx.http)
        .change_plan(organization_id, plan_id)
        .await
    {
        Ok(ack) => {
            crate::audit_log!(
                ctx.user_id(),
                "change_plan",
                format!("organization/{organization_id}"),
                plan_id
            );
            let message = if ack.message.is_empty() {
                format!("Organisation moved to plan {plan_id}")
            } else {
                ack.message
            };
            ConsoleNotifier.success(&message);
            Ok(true)
        }
        Err(e) => {
            ConsoleNotifier.error(&e.user_message("Error changing the plan"));
            Ok(false)
        }
    }
}
