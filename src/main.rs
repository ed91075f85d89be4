//! City Explorer - city search API
//!
//! Server binary: loads configuration, builds the shared state and serves
//! the HTTP API until interrupted.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use city_explorer::{create_router, AppState, Config};

/// Main entry point for the City Explorer API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build shared state (search cache, upstream clients, database, token signer)
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "city_explorer=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting City Explorer API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, cache_max_entries={}, database={}",
        config.server_port, config.cache_ttl, config.cache_max_entries, config.database_url
    );
    report_configuration(&config);

    let state = AppState::from_config(&config)?;
    info!("Search cache and database initialized");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Logs which upstreams are configured and how their failures are handled.
fn report_configuration(config: &Config) {
    if config.uses_default_secret() {
        warn!("SECRET_KEY not set, signing tokens with the built-in default secret");
    }
    if config.openweather_api_key.is_none() {
        warn!("OPENWEATHER_API_KEY not set, every search will fail until it is configured");
    }
    if config.timezonedb_api_key.is_none() {
        info!("TIMEZONEDB_API_KEY not set, local time falls back to UTC");
    }
    if config.places_api_key.is_none() {
        info!("OPENTRIPMAP_API_KEY not set, searches return no attractions");
    }
    info!(
        "Provider failure policy (fail open): weather={}, time={}, attractions={}",
        config.weather_fail_open, config.time_fail_open, config.attractions_fail_open
    );
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
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
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
