use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    error::AppResult,
    metrics::Operation,
    models::{Purchase, PurchaseRequest},
    store::StoreError,
    AppState,
};

use super::response_status;

// ── POST /purchase ───────────────────────────────────────────────────────────

pub async fn create_purchase(
    State(state): State<AppState>,
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> AppResult<Json<Purchase>> {
    let Json(request) = payload?;

    let start = Instant::now();
    let result = state.store.purchase(request).await;
    let elapsed = start.elapsed();

    let mut metrics = state.metrics.write().await;
    metrics.record(
        Operation::Purchase,
        response_status(&result, StatusCode::OK),
        Some(request.item_id),
        elapsed,
    );
    match &result {
        Ok(purchase) => metrics.record_sale(purchase),
        Err(StoreError::InsufficientStock { item_id, .. }) => metrics.record_stock_out(*item_id),
        Err(_) => {}
    }
    drop(metrics);

    let purchase = result?;
    info!(
        item_id = purchase.item_id,
        quantity = purchase.quantity,
        total_price = purchase.total_price,
        "Recorded purchase"
    );

    Ok(Json(purchase))
}
