//! HTTP handlers for the order endpoints

use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use uuid::Uuid;

use super::error::ApiError;
use super::{AppState, CORRELATION_HEADER};
use crate::core::query::OrderQuery;
use crate::core::service::QueryError;
use crate::core::validation;

/// List orders with filtering, sorting, pagination and review flags
///
/// GET /api/orders?pharmacyId=&status=&from=&to=&sort=&direction=&page=&pageSize=
///
/// The query string is taken as raw pairs so `status` may repeat and
/// malformed values surface through the structured 400 envelope rather than
/// an extractor rejection.
pub async fn get_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let correlation_id = correlation_id_from(&headers);
    let started = Instant::now();

    let query = OrderQuery::from_pairs(&pairs).map_err(|errors| {
        tracing::warn!(%correlation_id, ?errors, "rejected malformed query arguments");
        ApiError::validation(correlation_id, errors)
    })?;

    let report = validation::validate(&query);
    if !report.is_valid {
        tracing::warn!(%correlation_id, errors = ?report.errors, "query validation failed");
        return Err(ApiError::validation(correlation_id, report.errors));
    }

    let cancel = state.shutdown.child_token();
    match state.orders.get_orders(&query, &cancel).await {
        Ok(page) => {
            tracing::info!(
                %correlation_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                items = page.items.len(),
                total = page.total,
                "order query succeeded"
            );
            Ok(with_correlation(correlation_id, Json(page).into_response()))
        }
        Err(QueryError::Cancelled) => {
            tracing::info!(
                %correlation_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "order query cancelled"
            );
            Err(ApiError::cancelled(correlation_id))
        }
        Err(QueryError::Store(err)) => {
            tracing::error!(%correlation_id, error = ?err, "order query failed unexpectedly");
            Err(ApiError::internal(correlation_id))
        }
    }
}

/// Order count plus a small sample, for eyeballing what the store holds
///
/// GET /api/orders/debug
pub async fn debug_orders(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let orders = state.store.all().await.map_err(|err| {
        let correlation_id = Uuid::new_v4();
        tracing::error!(%correlation_id, error = ?err, "debug listing failed");
        ApiError::internal(correlation_id)
    })?;

    let sample: Vec<Value> = orders
        .iter()
        .take(3)
        .map(|order| {
            json!({
                "id": order.id,
                "pharmacyId": order.pharmacy_id,
                "status": order.status,
                "totalCents": order.total_cents,
            })
        })
        .collect();

    Ok(Json(json!({
        "orderCount": orders.len(),
        "sampleOrders": sample,
    })))
}

/// Liveness probe
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Inbound header value when it parses as a UUID, else a fresh one
fn correlation_id_from(headers: &HeaderMap) -> Uuid {
    headers
        .get(CORRELATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn with_correlation(correlation_id: Uuid, mut response: Response) -> Response {
    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}
