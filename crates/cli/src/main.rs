//! `cms`: command-line admin console for the CMS backend.
//!
//! ```bash
//! cms login --email admin@example.org          # password from CMS_PASSWORD
//! cms list news --page 2 --search radio
//! cms create banners --set title="Spring Promo" --file image=./spring.png
//! cms update youtube-videos 65f0c1 --set buttonText=Watch
//! cms delete team 65f0c9 --yes
//! ```

mod args;
mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cms_client::{ClientConfig, CmsApi, SessionStore};

use args::{EditArgs, ListArgs, ResourceArg};
use commands::Context;

#[derive(Parser)]
#[command(name = "cms")]
#[command(about = "Manage CMS content from the command line", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend origin (overrides CMS_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Print records and responses as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the token for later commands
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "CMS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show the backend and whether a token is stored
    Status,

    /// List one page of a resource
    List(ListArgs),

    /// Print one record
    Show {
        resource: ResourceArg,
        id: String,
    },

    /// Create a record
    Create {
        resource: ResourceArg,
        #[command(flatten)]
        edit: EditArgs,
    },

    /// Update a record; fields not given keep their current value
    Update {
        resource: ResourceArg,
        id: String,
        #[command(flatten)]
        edit: EditArgs,
    },

    /// Delete a record
    Delete {
        resource: ResourceArg,
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // --- Tracing ---
    let default_filter = match cli.verbose {
        0 => "cms_cli=info,cms_client=info",
        1 => "cms_cli=debug,cms_client=debug",
        _ => "cms_cli=trace,cms_client=trace,cms_core=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = cms_client::config::normalize_base_url(&url);
    }
    tracing::debug!(api_url = %config.api_url, "Loaded client configuration");

    // --- Session ---
    let store = SessionStore::load(&config.session_file).await?;
    let api = CmsApi::new(&config)?;
    let ctx = Context {
        api,
        store,
        config,
        json: cli.json,
    };

    match cli.command {
        Command::Login { email, password } => commands::login(&ctx, &email, password).await,
        Command::Logout => commands::logout(&ctx).await,
        Command::Status => commands::status(&ctx),
        Command::List(args) => commands::list(&ctx, &args).await,
        Command::Show { resource, id } => commands::show(&ctx, resource.0, &id).await,
        Command::Create { resource, edit } => commands::save(&ctx, resource.0, None, &edit).await,
        Command::Update { resource, id, edit } => {
            commands::save(&ctx, resource.0, Some(&id), &edit).await
        }
        Command::Delete { resource, id, yes } => commands::delete(&ctx, resource.0, &id, yes).await,
    }
}
