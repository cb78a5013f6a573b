//! Nexlog Kernel
//!
//! HTTP server and command-line query composer.
//!
//! Usage:
//!   nexlog serve
//!   nexlog compose --input question.json --filter rust --force-generate

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use clap::{Parser, Subcommand};
use nexlog_kernel::routes;
use nexlog_kernel::search::{SearchParams, compose_search};
use nexlog_kernel::site::SiteDataState;
use nexlog_kernel::state::load_site;
use nexlog_kernel::{AppState, Config};
use nexlog_sdk::types::{ContentType, StructuredUserInput};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Nexlog kernel.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Compose the search query for a user input file and print it.
    Compose {
        /// JSON file holding the structured user input.
        #[arg(long)]
        input: PathBuf,

        /// Collection to search.
        #[arg(long, default_value = "GoogleDoc")]
        content_type: ContentType,

        /// Keyword, topic or entity filter; repeatable.
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Add the generative stage even for plain searches.
        #[arg(long)]
        force_generate: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Compose {
            input,
            content_type,
            filters,
            force_generate,
        } => compose(&config, &input, content_type, filters, force_generate),
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting Nexlog kernel");
    info!(port = config.port, "Configuration loaded");

    // Defaults are attached here; plugin components resolve in the background
    let state = AppState::new(&config)
        .await
        .context("failed to initialize application state")?;

    let cors = build_cors_layer(&config);

    let app = routes::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Arc::clone(state.site())))
        .await
        .context("server error")?;

    Ok(())
}

fn compose(
    config: &Config,
    input: &std::path::Path,
    content_type: ContentType,
    filters: Vec<String>,
    force_generate: bool,
) -> Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let input: StructuredUserInput =
        serde_json::from_str(&raw).context("input is not a valid structured user input")?;

    let site = load_site(config)?;
    let params = SearchParams {
        filters,
        force_generate,
        ..SearchParams::new(input)
    };

    let query = compose_search(&site, content_type, &params)?;
    println!("{}", query.to_graphql());

    site.close();
    Ok(())
}

/// Wait for Ctrl+C, then close the site data session.
async fn shutdown_signal(site: Arc<SiteDataState>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
    site.close();
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if config.cors_allowed_origins.len() == 1 && config.cors_allowed_origins[0] == "*" {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        // stdout is reserved for `compose` output
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
