use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod schema;
mod seed;

use crate::config::Config;
use crate::db::StorageHandle;

/// Shared application state — cheap to clone (all heap behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub storage: StorageHandle,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,catalog_service=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Catalog Service  — Rust + Axum      ║");
    info!("╚══════════════════════════════════════╝");

    // Absent storage is fine: catalog routes answer 500, diagnostics say why.
    let storage = db::connect(&config).await;

    // Best-effort; finishes before the listener opens.
    seed::seed_products_if_empty(&storage).await;

    let state = AppState {
        storage: storage.clone(),
        config: Arc::new(config.clone()),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    db::close(&storage).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Greetings ───────────────────────────────────────────────────────
        .route("/", get(handlers::root))
        .route("/api/hello", get(handlers::hello))

        // ── Diagnostics ─────────────────────────────────────────────────────
        .route("/test", get(handlers::diagnostics::test_database))

        // ── Schema declaration ──────────────────────────────────────────────
        .route("/schema", get(handlers::schema))

        // ── Products (read-only) ────────────────────────────────────────────
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/products/:slug", get(handlers::products::get_product))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
