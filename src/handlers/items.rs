use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    metrics::Operation,
    models::{InventorySnapshot, Item, ItemPayload},
    store::CreateOutcome,
    AppState,
};

use super::response_status;

/// Path ids must be positive integers.
pub(crate) fn parse_id(raw: &str) -> AppResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_id()),
    }
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<InventorySnapshot>> {
    let start = Instant::now();
    let snapshot = state.store.snapshot().await;
    let elapsed = start.elapsed();

    info!(
        items = snapshot.items.len(),
        purchases = snapshot.purchase_history.len(),
        "Listed items"
    );

    state
        .metrics
        .write()
        .await
        .record(Operation::List, StatusCode::OK.as_u16(), None, elapsed);

    Ok(Json(snapshot))
}

// ── Create or merge ───────────────────────────────────────────────────────────

pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let Json(payload) = payload?;

    let start = Instant::now();
    let result = state.store.create_or_merge(payload).await;
    let ok = match &result {
        Ok((_, CreateOutcome::Merged)) => StatusCode::OK,
        _ => StatusCode::CREATED,
    };
    state.metrics.write().await.record(
        Operation::Create,
        response_status(&result, ok),
        result.as_ref().ok().map(|(item, _)| item.id),
        start.elapsed(),
    );

    let (item, outcome) = result?;
    let status = match outcome {
        CreateOutcome::Created => {
            info!(id = item.id, name = %item.name, quantity = item.quantity, "Created item");
            StatusCode::CREATED
        }
        CreateOutcome::Merged => {
            info!(id = item.id, name = %item.name, quantity = item.quantity, "Merged into existing item");
            StatusCode::OK
        }
    };

    Ok((status, Json(item)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Item>> {
    let id = parse_id(&raw_id)?;

    let start = Instant::now();
    let result = state.store.get(id).await;
    state
        .metrics
        .write()
        .await
        .record(
            Operation::Get,
            response_status(&result, StatusCode::OK),
            Some(id),
            start.elapsed(),
        );

    let item = result?;
    info!(id, "Fetched item");
    Ok(Json(item))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> AppResult<Json<Item>> {
    let id = parse_id(&raw_id)?;
    let Json(payload) = payload?;

    let start = Instant::now();
    let result = state.store.update(id, payload).await;
    state
        .metrics
        .write()
        .await
        .record(
            Operation::Update,
            response_status(&result, StatusCode::OK),
            Some(id),
            start.elapsed(),
        );

    let item = result?;
    info!(id, name = %item.name, quantity = item.quantity, "Updated item");
    Ok(Json(item))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&raw_id)?;

    let start = Instant::now();
    let result = state.store.delete(id).await;
    state
        .metrics
        .write()
        .await
        .record(
            Operation::Delete,
            response_status(&result, StatusCode::NO_CONTENT),
            Some(id),
            start.elapsed(),
        );

    let item = result?;
    info!(id, name = %item.name, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("9000").unwrap(), 9000);
    }

    #[test]
    fn parse_id_rejects_zero_negative_and_text() {
        for raw in ["0", "-2", "abc", "1.5", ""] {
            assert!(
                matches!(parse_id(raw), Err(AppError::BadRequest(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
