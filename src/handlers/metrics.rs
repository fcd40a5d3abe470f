use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::{error::AppResult, metrics::MetricsSummary, AppState};

// ── GET /metrics ─────────────────────────────────────────────────────────────

pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSummary> {
    Json(state.metrics.read().await.summary())
}

// ── GET /metrics/csv ─────────────────────────────────────────────────────────

pub async fn export_csv(State(state): State<AppState>) -> AppResult<Response> {
    let csv = state.metrics.read().await.recent_csv()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"inventory_operations.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

// ── DELETE /metrics ──────────────────────────────────────────────────────────

pub async fn reset_metrics(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    let dropped = state.metrics.write().await.clear();

    info!(dropped, "Metrics cleared");

    (
        StatusCode::OK,
        Json(serde_json::json!({ "metrics_cleared": true, "dropped_records": dropped })),
    )
}
