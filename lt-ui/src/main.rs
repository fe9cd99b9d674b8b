//! Living Tags UI (lt-ui) - Web front-end entry point
//!
//! Browsing, adding, and viewing AI-tagged text snippets. Persistence lives
//! in the external managed store; this process only holds one configured
//! store client, built at startup and reused across requests.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lt_ui::cache::QueryCache;
use lt_ui::store::RestStoreClient;
use lt_ui::texts::TextService;
use lt_ui::{build_router, AppState};

/// Command-line arguments for lt-ui
#[derive(Parser, Debug)]
#[command(name = "lt-ui")]
#[command(about = "Living Tags web front-end")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "LT_UI_PORT")]
    port: u16,

    /// Base URL of the managed store's REST API
    #[arg(long, env = "LT_STORE_URL")]
    store_url: String,

    /// API key for the managed store
    #[arg(long, env = "LT_STORE_API_KEY")]
    store_api_key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lt_ui=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting Living Tags UI (lt-ui) v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Store: {}", args.store_url);

    let store = RestStoreClient::new(args.store_url.as_str(), args.store_api_key.as_str())
        .context("Failed to build store client")?;

    let cache = Arc::new(QueryCache::new(100));
    let service = TextService::new(Arc::new(store), cache);

    let app = build_router(AppState::new(service));

    let bind_addr = format!("127.0.0.1:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("lt-ui listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
