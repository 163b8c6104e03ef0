//! `factu-admin` - FactuPOS administration CLI
//!
//! Drives the admin client from a terminal: plans and billing, store and
//! terminal configuration, POS settings and the super-admin panel.

mod commands;
mod logger;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{Context, ResourceKind};

/// FactuPOS administration CLI.
#[derive(Parser, Debug)]
#[command(name = "factu-admin", about = "FactuPOS administration CLI", version)]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "FACTU_API_URL", global = true, default_value = "http://localhost:8001")]
    api_url: String,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, env = "FACTU_LOG_LEVEL", global = true, default_value = "warn")]
    log_level: String,

    /// JSON log lines on stderr.
    #[arg(long, env = "FACTU_LOG_JSON", global = true)]
    log_json: bool,

    /// Directory for rotating app logs and the audit log.
    #[arg(long, env = "FACTU_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Exchange a Google OAuth code and store the session.
    Login {
        /// Authorization code from the Google redirect.
        code: String,
        /// Store name, to finish registering a new account.
        #[arg(long)]
        store_name: Option<String>,
        /// Password for a new account.
        #[arg(long, env = "FACTU_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Password confirmation.
        #[arg(long, hide_env_values = true)]
        confirm_password: Option<String>,
    },

    /// Clear the stored session.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Public plan catalog.
    Plans,

    /// Current plan, usage bars and available upgrades.
    MyPlan,

    /// Subscription and billing.
    Subscription {
        #[command(subcommand)]
        action: SubscriptionAction,
    },

    /// List records of a resource.
    List { resource: ResourceKind },

    /// Create a record from a JSON draft.
    Create {
        resource: ResourceKind,
        /// Draft as JSON (backend field names).
        #[arg(long = "json-body")]
        json_body: String,
    },

    /// Update fields of a record.
    Update {
        resource: ResourceKind,
        id: String,
        /// Fields to change as JSON (backend field names).
        #[arg(long = "json-body")]
        json_body: String,
    },

    /// Flip the active flag of a record.
    Toggle { resource: ResourceKind, id: String },

    /// Delete a record.
    Delete {
        resource: ResourceKind,
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Product categories.
    Categories,

    /// Saved open tickets.
    OpenTickets {
        #[command(subcommand)]
        action: OpenTicketsAction,
    },

    /// POS feature switches.
    Features {
        #[command(subcommand)]
        action: FeaturesAction,
    },

    /// Receipt configuration.
    Receipt {
        #[command(subcommand)]
        action: ReceiptAction,
    },

    /// Format a fiscal code and preview the first receipt number.
    Code {
        /// Raw emission point input.
        emission_point: String,
        /// Establishment code of the store.
        #[arg(long)]
        establishment: Option<String>,
    },

    /// Platform administration (super-admin only).
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand, Debug)]
enum SubscriptionAction {
    /// Current subscription.
    Show,
    /// Start a checkout and print its URL.
    Checkout {
        plan_id: String,
        /// URL the provider redirects back to.
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
    },
    /// Wait for a checkout session to settle.
    Verify { session_id: String },
    /// Cancel at the end of the paid period.
    Cancel {
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Undo a pending cancellation.
    Reactivate,
    /// Payment history.
    Payments,
}

#[derive(Subcommand, Debug)]
enum OpenTicketsAction {
    List,
    Delete {
        id: String,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Delete every saved ticket.
    Clear {
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum FeaturesAction {
    Show,
    /// Flip a feature and save (e.g. `tickets_abiertos`).
    Toggle { feature: String },
}

#[derive(Subcommand, Debug)]
enum ReceiptAction {
    Show,
    /// Upload a logo image and save the configuration.
    UploadLogo {
        /// `email` or `impreso`.
        kind: String,
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum AdminAction {
    Dashboard,
    Organizations,
    /// Move an organisation to another plan.
    ChangePlan {
        organization_id: String,
        plan_id: String,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(&cli.log_level, cli.log_json, cli.log_dir.as_deref())?;

    let ctx = Context::new(&cli.api_url, cli.json)?;
    tracing::debug!(base_url = %ctx.config.base_url, "factu-admin starting");

    let ok = match cli.command {
        Commands::Login {
            code,
            store_name,
            password,
            confirm_password,
        } => commands::auth::login(ctx, &code, store_name, password, confirm_password).await?,
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx)?,

        Commands::Plans => commands::plans::catalog(&ctx).await?,
        Commands::MyPlan => commands::plans::my_plan(&ctx).await?,
        Commands::Subscription { action } => match action {
            SubscriptionAction::Show => commands::plans::subscription(&ctx).await?,
            SubscriptionAction::Checkout { plan_id, origin } => {
                commands::plans::checkout(&ctx, &plan_id, &origin).await?
            }
            SubscriptionAction::Verify { session_id } => {
                commands::plans::verify(&ctx, &session_id).await?
            }
            SubscriptionAction::Cancel { yes } => commands::plans::cancel(&ctx, yes).await?,
            SubscriptionAction::Reactivate => commands::plans::reactivate(&ctx).await?,
            SubscriptionAction::Payments => commands::plans::payments(&ctx).await?,
        },

        Commands::List { resource } => commands::resources::list(&ctx, resource).await?,
        Commands::Create {
            resource,
            json_body,
        } => commands::resources::create(&ctx, resource, &json_body).await?,
        Commands::Update {
            resource,
            id,
            json_body,
        } => commands::resources::update(&ctx, resource, &id, &json_body).await?,
        Commands::Toggle { resource, id } => commands::resources::toggle(&ctx, resource, &id).await?,
        Commands::Delete { resource, id, yes } => {
            commands::resources::delete(&ctx, resource, &id, yes).await?
        }
        Commands::Categories => commands::resources::categories(&ctx).await?,

        Commands::OpenTickets { action } => match action {
            OpenTicketsAction::List => commands::tickets::list(&ctx).await?,
            OpenTicketsAction::Delete { id, yes } => commands::tickets::delete(&ctx, &id, yes).await?,
            OpenTicketsAction::Clear { yes } => commands::tickets::clear(&ctx, yes).await?,
        },

        Commands::Features { action } => match action {
            FeaturesAction::Show => commands::settings::show_features(&ctx).await?,
            FeaturesAction::Toggle { feature } => {
                commands::settings::toggle_feature(&ctx, &feature).await?
            }
        },
        Commands::Receipt { action } => match action {
            ReceiptAction::Show => commands::settings::show_receipt(&ctx).await?,
            ReceiptAction::UploadLogo { kind, file } => {
                commands::settings::upload_logo(&ctx, &kind, &file).await?
            }
        },
        Commands::Code {
            emission_point,
            establishment,
        } => commands::settings::code(&emission_point, establishment.as_deref()),

        Commands::Admin { action } => match action {
            AdminAction::Dashboard => commands::admin::dashboard(&ctx).await?,
            AdminAction::Organizations => commands::admin::organizations(&ctx).await?,
            AdminAction::ChangePlan {
                organization_id,
                plan_id,
                yes,
            } => commands::admin::change_plan(&ctx, &organization_id, &plan_id, yes).await?,
        },
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
