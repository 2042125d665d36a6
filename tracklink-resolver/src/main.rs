//! tracklink-resolver - YouTube → music-service track link service
//!
//! **Modes:**
//! - `serve` (default): HTTP API on port 5790
//! - `resolve <URL>`: one-shot resolution printed as JSON

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracklink_common::config::{find_toml_config, TomlConfig};
use tracklink_resolver::config::ResolverSettings;
use tracklink_resolver::{build_router, AppState, LookupMode};

/// Command-line arguments for tracklink-resolver
#[derive(Parser, Debug)]
#[command(name = "tracklink-resolver")]
#[command(about = "Resolve YouTube links into music-service track metadata")]
#[command(version)]
struct Args {
    /// Path to TOML config file (defaults to the platform config location)
    #[arg(short, long, env = "TRACKLINK_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides TOML)
    #[arg(short, long, env = "TRACKLINK_PORT")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve,
    /// Resolve a single URL and print the result as JSON
    Resolve {
        /// YouTube watch or playlist URL
        url: String,

        /// Only use the `v=` video id of the URL
        #[arg(long)]
        video_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so the TOML log level applies;
    // a read failure is reported once the subscriber is up.
    let config_result = find_toml_config(args.config.as_deref());
    let toml_config = match &config_result {
        Ok(Some(config)) => config.clone(),
        _ => TomlConfig::default(),
    };

    init_tracing(&toml_config.logging.level);

    info!(
        "Starting tracklink-resolver v{}",
        env!("CARGO_PKG_VERSION")
    );
    if let Err(e) = &config_result {
        warn!("{}. Using compiled defaults.", e);
    }

    let settings = ResolverSettings::from_sources(&toml_config, args.port);
    let resolver = Arc::new(
        settings
            .build_resolver()
            .context("Failed to initialize metadata sources")?,
    );

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings.port, resolver).await,
        Command::Resolve { url, video_only } => {
            let mode = if video_only {
                LookupMode::VideoOnly
            } else {
                LookupMode::Full
            };
            let track = resolver.run(&url, mode).await?;
            println!("{}", serde_json::to_string_pretty(&track)?);
            Ok(())
        }
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("tracklink_resolver={level},tracklink_common={level},tower_http={level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(port: u16, resolver: Arc<tracklink_resolver::TrackResolver>) -> Result<()> {
    let app = build_router(AppState::new(resolver));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
