use anyhow::{Context, Result};
use bson::doc;
use clap::{Parser, Subcommand};
use tracing::info;

use zccore::config::Settings;
use zccore::models::User;
use zccore::{connect_store, create_app, AppState};

#[derive(Parser)]
#[command(name = "zccore", version, about = "Organization service")]
struct Cli {
    /// Use the in-memory store regardless of DB_BACKEND
    #[arg(long, global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Insert a user document so organizations can be created for it
    SeedUser {
        #[arg(long)]
        email: String,
        /// Store the user as not yet verified
        #[arg(long)]
        unverified: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "zccore=info,tower_http=debug".into()),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let cli = Cli::parse();
    let settings = if cli.in_memory {
        Settings::in_memory()
    } else {
        Settings::load().context("Failed to load application settings")?
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::SeedUser { email, unverified } => seed_user(settings, email, !unverified).await,
    }
}

async fn serve(settings: Settings) -> Result<()> {
    let address = settings.server.address()?;
    let store = connect_store(&settings)
        .await
        .context("Failed to connect to document store")?;

    let app = create_app(AppState::new(settings, store));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .context("Failed to bind to server address")?;
    info!("listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn seed_user(settings: Settings, email: String, is_verified: bool) -> Result<()> {
    let store = connect_store(&settings)
        .await
        .context("Failed to connect to document store")?;
    let collection = &settings.collections.user_collection;

    if store
        .find_one(collection, doc! { "email": email.as_str() })
        .await?
        .is_some()
    {
        anyhow::bail!("user {} already exists", email);
    }

    let mut user = User::new(email);
    user.is_verified = is_verified;
    let id = store
        .insert_one(collection, bson::to_document(&user)?)
        .await
        .context("Failed to insert user")?;

    info!("Seeded user {} with id {}", user.email, id);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
