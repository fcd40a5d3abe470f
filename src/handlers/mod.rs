pub mod items;
pub mod metrics;
pub mod purchases;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use serde_json::json;

use crate::{error::AppError, store::StoreResult, AppState};

/// Status code a store result is answered with.
pub(crate) fn response_status<T>(result: &StoreResult<T>, ok: StatusCode) -> u16 {
    match result {
        Ok(_) => ok.as_u16(),
        Err(err) => AppError::from(err.clone()).status().as_u16(),
    }
}

/// Anything under `/items/` that is not a single id segment is a bad id.
pub async fn unmatched(uri: Uri) -> AppError {
    if uri.path().starts_with("/items/") {
        AppError::invalid_id()
    } else {
        AppError::NotFound("Not found".to_string())
    }
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let item_count = state.store.item_count().await;
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "inventory-store", "item_count": item_count })),
    )
}
