// ABOUTME: Entry point for the guestd binary.
// ABOUTME: Initializes tracing, loads config, opens the store, and starts the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use guestd_server::{AppState, GuestdConfig, create_router};
use guestd_store::GuestStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guestd=debug,tower_http=debug".parse().unwrap()),
        )
        .init();

    let config = GuestdConfig::from_env()?;

    // Schema is ensured here, before the listener comes up
    let store = GuestStore::open(&config.db_path)
        .with_context(|| format!("failed to open guest store at {}", config.db_path.display()))?;
    let state = Arc::new(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("guestd listening on {}", config.bind);

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
