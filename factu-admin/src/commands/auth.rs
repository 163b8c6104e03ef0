//! login / logout / whoami

use factu_client::api::{AuthApi, AuthOutcome, RegistrationForm, apply_login};
use factu_client::{LoginResponse, Notifier};

use super::{ConsoleNotifier, Context};

pub async fn login(
    mut ctx: Context,
    code: &str,
    store_name: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
) -> anyhow::Result<bool> {
    let notifier = ConsoleNotifier;
    let api = AuthApi::new(&ctx.http);

    let login = match api.exchange_code(code).await {
        Ok(AuthOutcome::LoggedIn(login)) => login,
        Ok(AuthOutcome::NeedsRegistration(pending)) => {
            let (Some(store_name), Some(password)) = (store_name, password) else {
                notifier.error(&format!(
                    "{} has no FactuPOS account yet; rerun with --store-name and --password to create one",
                    pending.email
                ));
                return Ok(false);
            };
            let form = RegistrationForm {
                code: code.to_string(),
                store_name,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            match api.register(&form).await {
                Ok(login) => login,
                Err(e) => {
                    notifier.error(&e.user_message("Registration failed"));
                    return Ok(false);
                }
            }
        }
        Err(e) => {
            notifier.error(&e.user_message("Google sign-in failed"));
            return Ok(false);
        }
    };

    report_login(&login, &notifier);
    apply_login(login, &mut ctx.session, Some(&ctx.store))?;
    Ok(true)
}

fn report_login(login: &LoginResponse, notifier: &impl Notifier) {
    let mut line = format!("Logged in as {}", login.user.name);
    if let Some(email) = &login.user.email {
        line.push_str(&format!(" <{email}>"));
    }
    notifier.success(&line);
}

pub async fn logout(ctx: &Context) -> anyhow::Result<bool> {
    if ctx.session.is_authenticated() {
        AuthApi::new(&ctx.http).logout().await;
    }
    ctx.store.clear()?;
    ConsoleNotifier.success("Logged out");
    Ok(true)
}

pub fn whoami(ctx: &Context) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let Some(user) = ctx.session.user() else {
        println!("Logged in (no cached profile)");
        return Ok(true);
    };
    ctx.print(user, || {
        println!("{} ({})", user.name, user.id);
        if let Some(email) = &user.email {
            println!("  email:        {email}");
        }
        if let Some(role) = &user.rol {
            println!("  role:         {role}");
        }
        if let Some(org) = &user.organizacion_id {
            println!("  organisation: {org}");
        }
        if let Some(exp) = ctx.session.expires_at()
            && let Some(at) = chrono::DateTime::from_timestamp(i64::try_from(exp).unwrap_or(i64::MAX), 0)
        {
            println!("  expires:      {}", at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"));
        }
    })?;
    Ok(true)
}
