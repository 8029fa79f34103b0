//! grindlog-api - HTTP API server for grindlog

use std::num::NonZeroU32;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grindlog_api::auth::{AuthProvider, HttpAuthProvider, StaticAuthProvider};
use grindlog_api::{build_router, AppState};
use grindlog_judges::ProblemImporter;
use grindlog_store::{RedisClient, RedisConfig, Store};

/// Default bind address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default global rate limit, requests per second.
const DEFAULT_RATE_LIMIT_PER_SECOND: u32 = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let state = build_state().await?;

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        subsystem = "api",
        op = "startup",
        addr = %bind_addr,
        version = env!("CARGO_PKG_VERSION"),
        "grindlog API listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(subsystem = "api", op = "shutdown", "grindlog API stopped");
    Ok(())
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors
///   RUST_LOG    - standard env filter (default: "grindlog_api=debug,tower_http=debug")
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "grindlog_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(path) = log_file {
        let file_dir = std::path::Path::new(&path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(&path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("grindlog-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Keep the writer alive for the process lifetime.
        std::mem::forget(guard);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(log_ansi.unwrap_or(false)),
                )
                .init();
        }
    } else if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        let mut layer = tracing_subscriber::fmt::layer();
        if let Some(ansi) = log_ansi {
            layer = layer.with_ansi(ansi);
        }
        registry.with(layer).init();
    }
}

/// Assemble application state from the environment.
///
/// - `REDIS_ENABLED=false` swaps the store for the in-memory backend
///   (development only; data does not survive a restart).
/// - `AUTH_ENABLED=false` swaps the identity provider for a single local
///   user accepting `DEV_AUTH_TOKEN` (default "dev").
/// - `AUTH_BASE_URL` is required when auth is enabled.
/// - `RATE_LIMIT_PER_SECOND` tunes the global limiter; 0 disables it.
async fn build_state() -> anyhow::Result<AppState> {
    let redis_enabled = std::env::var("REDIS_ENABLED")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true);
    let store = if redis_enabled {
        Store::redis(RedisClient::connect(RedisConfig::from_env()).await?)
    } else {
        warn!(
            subsystem = "api",
            op = "startup",
            "REDIS_ENABLED=false: using in-memory store, data is not persisted"
        );
        Store::memory()
    };

    let auth_enabled = std::env::var("AUTH_ENABLED")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true);
    let auth: Arc<dyn AuthProvider> = if auth_enabled {
        let base_url = std::env::var("AUTH_BASE_URL")
            .map_err(|_| anyhow::anyhow!("AUTH_BASE_URL is required when auth is enabled"))?;
        Arc::new(HttpAuthProvider::new(base_url))
    } else {
        let token = std::env::var("DEV_AUTH_TOKEN").unwrap_or_else(|_| "dev".to_string());
        warn!(
            subsystem = "api",
            op = "startup",
            "AUTH_ENABLED=false: single-user dev mode"
        );
        Arc::new(StaticAuthProvider::local(token))
    };

    let mut state = AppState::new(store, auth, ProblemImporter::new());

    let rate_limit: u32 = std::env::var("RATE_LIMIT_PER_SECOND")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT_PER_SECOND);
    if let Some(per_second) = NonZeroU32::new(rate_limit) {
        state = state.with_rate_limit(per_second);
    }

    Ok(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(subsystem = "api", error = %e, "Failed to listen for shutdown signal");
    }
}
