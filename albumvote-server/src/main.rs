//! albumvote-server - saved-album voting service
//!
//! Users log in with their music account to list their saved albums;
//! visitors vote on them and the top albums page ranks the votes. Votes live
//! in memory for the lifetime of the process.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use albumvote_common::config::{load_or_default, resolve_config_path};
use albumvote_common::VoteStore;
use albumvote_server::auth::OAuthClient;
use albumvote_server::catalog::SpotifyCatalog;
use albumvote_server::config::{CliOverrides, ServiceSettings};
use albumvote_server::{build_router, AppState};

/// Command-line arguments for albumvote-server
#[derive(Parser, Debug)]
#[command(name = "albumvote-server")]
#[command(about = "Vote on saved albums and rank the favorites")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long, env = "ALBUMVOTE_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "ALBUMVOTE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "ALBUMVOTE_PORT")]
    port: Option<u16>,

    /// OAuth client id
    #[arg(long, env = "ALBUMVOTE_CLIENT_ID")]
    client_id: Option<String>,

    /// OAuth client secret (environment only, never on the command line)
    #[arg(skip = std::env::var("ALBUMVOTE_CLIENT_SECRET").ok())]
    client_secret: Option<String>,

    /// Directory served under /static
    #[arg(long, env = "ALBUMVOTE_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "ALBUMVOTE_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            host: self.host.clone(),
            port: self.port,
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            static_dir: self.static_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is loaded before tracing so the file can set the log level.
    let config_path = resolve_config_path(args.config.as_deref(), "ALBUMVOTE_CONFIG");
    let toml = load_or_default(config_path.as_deref()).context("Failed to load configuration")?;
    let settings =
        ServiceSettings::resolve(&args.overrides(), toml).context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "albumvote_server={level},albumvote_common={level},tower_http=info",
                    level = settings.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting albumvote-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file, using defaults and environment"),
    }

    let oauth = OAuthClient::from_config(&settings.oauth)
        .context("OAuth client misconfigured (set ALBUMVOTE_CLIENT_ID and ALBUMVOTE_CLIENT_SECRET)")?;
    let catalog = SpotifyCatalog::new(&settings.api_base_url)
        .context("Failed to initialize catalog client")?;

    // The one vote store for this process
    let votes = Arc::new(VoteStore::new());

    let state = AppState::new(&settings, votes, Arc::new(oauth), Arc::new(catalog));
    let shutdown = state.shutdown.clone();
    info!("Static assets: {}", settings.static_dir.display());

    let app = build_router(state);

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM and cancels in-flight catalog fetches
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }

    shutdown.cancel();
}
