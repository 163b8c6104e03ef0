//! POS features, receipt configuration and fiscal code helpers

use std::path::Path;

use anyhow::{Context as _, bail};
use factu_client::format::{is_complete_code, pad_on_blur, receipt_number_preview};
use factu_client::{FeaturesScreen, ReceiptConfigScreen, UploadFile};
use shared::models::{LogoKind, PosFeature};

use super::{ConsoleNotifier, Context, mark};

pub async fn show_features(ctx: &Context) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let mut screen = FeaturesScreen::new(ctx.http.clone(), ConsoleNotifier);
    if !screen.load().await {
        return Ok(false);
    }
    let features = screen.features();
    ctx.print(features, || {
        for feature in PosFeature::ALL {
            println!("{:<20} {}", feature.wire_key(), mark(features.is_enabled(feature)));
        }
        if features.open_tickets_count > 0 {
            println!("{} saved open ticket(s)", features.open_tickets_count);
        }
    })?;
    Ok(true)
}

pub async fn toggle_feature(ctx: &Context, key: &str) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let Some(feature) = PosFeature::parse(key) else {
        let known: Vec<&str> = PosFeature::ALL.iter().map(|f| f.wire_key()).collect();
        bail!("Unknown feature `{key}`; expected one of: {}", known.join(", "));
    };

    let mut screen = FeaturesScreen::new(ctx.http.clone(), ConsoleNotifier);
    if !screen.load().await {
        return Ok(false);
    }
    let Some(enabled) = screen.toggle(feature) else {
        return Ok(false);
    };
    tracing::info!(feature = key, enabled, "Feature toggled");
    Ok(screen.save().await)
}

pub async fn show_receipt(ctx: &Context) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let mut screen = ReceiptConfigScreen::new(ctx.http.clone(), ConsoleNotifier);
    if !screen.load().await {
        return Ok(false);
    }
    let config = screen.config();
    ctx.print(config, || {
        let rows = [
            ("Header", config.header.as_str()),
            ("Business name", config.business_name.as_str()),
            ("Address", config.address.as_str()),
            ("Phone", config.phone.as_str()),
            ("Tax id", config.tax_id.as_str()),
            ("Email", config.email.as_str()),
            ("Website", config.website.as_str()),
            ("Footer", config.footer.as_str()),
            ("Email logo", config.email_logo.as_str()),
            ("Printed logo", config.printed_logo.as_str()),
        ];
        for (label, value) in rows {
            println!("{label:<16} {value}");
        }
        println!("{:<16} {}", "Print ticket", mark(config.print_ticket));
        println!("{:<16} {}", "Customer info", mark(config.show_customer_info));
        println!("{:<16} {}", "Comments", mark(config.show_comments));
    })?;
    Ok(true)
}

fn parse_logo_kind(kind: &str) -> anyhow::Result<LogoKind> {
    match kind {
        "email" => Ok(LogoKind::Email),
        "impreso" | "printed" => Ok(LogoKind::Printed),
        other => bail!("Unknown logo kind `{other}`; expected `email` or `impreso`"),
    }
}

/// Upload the image, point the configuration at it and save
pub async fn upload_logo(ctx: &Context, kind: &str, file: &Path) -> anyhow::Result<bool> {
    ctx.require_login()?;
    let kind = parse_logo_kind(kind)?;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("logo.png")
        .to_string();

    let mut screen = ReceiptConfigScreen::new(ctx.http.clone(), ConsoleNotifier);
    if !screen.load().await {
        return Ok(false);
    }
    if !screen
        .upload_logo(kind, UploadFile::image(file_name, bytes), &ctx.config)
        .await
    {
        return Ok(false);
    }
    Ok(screen.save().await)
}

/// Pad an emission point the way the terminal form does and preview its
/// first receipt number
pub fn code(emission_point: &str, establishment: Option<&str>) -> bool {
    let emission = pad_on_blur(emission_point);
    let establishment = establishment.map(pad_on_blur);
    println!(
        "{}",
        receipt_number_preview(establishment.as_deref(), &emission)
    );
    is_complete_code(&emission)
}
