use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use collabdb_core::{NewPricePoint, PricePoint, PriceStats};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AddPriceRequest {
    pub price: Decimal,
    pub source: Option<String>,
}

pub(super) async fn price_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
) -> Json<ApiResponse<Vec<PricePoint>>> {
    ApiResponse::new(state.store.price_history(&product_id).await, req_id.0)
}

pub(super) async fn add_price_point(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
    body: Result<Json<AddPriceRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PricePoint>>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::validation(req_id.0.clone(), e.body_text()))?;
    let point = NewPricePoint::new(product_id, body.price, body.source)
        .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?;

    let stored = state.store.add_price_point(point).await;
    tracing::debug!(product_id = %stored.product_id, price = %stored.price, "price point recorded");
    Ok(ApiResponse::new(stored, req_id.0))
}

pub(super) async fn price_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
) -> Json<ApiResponse<Option<PriceStats>>> {
    ApiResponse::new(state.store.price_stats(&product_id).await, req_id.0)
}

pub(super) async fn lowest_price(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
) -> Json<ApiResponse<Option<PricePoint>>> {
    ApiResponse::new(state.store.lowest_price(&product_id).await, req_id.0)
}

pub(super) async fn highest_price(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
) -> Json<ApiResponse<Option<PricePoint>>> {
    ApiResponse::new(state.store.highest_price(&product_id).await, req_id.0)
}
