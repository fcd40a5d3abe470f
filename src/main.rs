use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod store;

use crate::config::Config;
use crate::metrics::InventoryMetrics;
use crate::store::InventoryStore;

/// Shared application state. Cheap to clone, everything sits behind an Arc.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InventoryStore>,
    pub metrics: Arc<RwLock<InventoryMetrics>>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            store: Arc::new(InventoryStore::new()),
            metrics: Arc::new(RwLock::new(InventoryMetrics::with_capacity(
                config.metrics_capacity,
            ))),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,inventory_store=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("Inventory store starting (in-memory, no persistence)");

    let state = AppState::new(&config);
    let app = build_router(state, &config);

    let addr = config.bind_addr();
    info!("Listening on http://{}", addr);
    if let Some(dir) = &config.static_dir {
        info!("Serving {} at http://{}/static/", dir.display(), addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Items ───────────────────────────────────────────────────────────
        .route(
            "/items",
            get(handlers::items::list_items).post(handlers::items::create_item),
        )
        .route(
            "/items/:id",
            get(handlers::items::get_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )

        // ── Purchases ───────────────────────────────────────────────────────
        .route("/purchase", post(handlers::purchases::create_purchase))

        // ── Metrics ─────────────────────────────────────────────────────────
        .route(
            "/metrics",
            get(handlers::metrics::get_metrics).delete(handlers::metrics::reset_metrics),
        )
        .route("/metrics/csv", get(handlers::metrics::export_csv))
        .fallback(handlers::unmatched);

    // ── Browser client ──────────────────────────────────────────────────────
    if let Some(dir) = &config.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    // ── Middleware ──────────────────────────────────────────────────────────
    if config.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
