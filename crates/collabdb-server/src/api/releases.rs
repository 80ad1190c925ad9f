//! Release calendar routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use collabdb_core::{CoreError, NewRelease, Release};
use collabdb_store::DEFAULT_UPCOMING_DAYS;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct UpcomingQuery {
    pub days: Option<u32>,
}

/// Announced drop. Only `name` and `date` (`YYYY-MM-DD`) are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddReleaseRequest {
    pub name: String,
    pub date: NaiveDate,
    pub brand: Option<String>,
    pub time: Option<String>,
    pub price: Option<Decimal>,
    #[serde(alias = "image")]
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub hot: bool,
}

impl TryFrom<AddReleaseRequest> for NewRelease {
    type Error = CoreError;

    fn try_from(req: AddReleaseRequest) -> Result<Self, Self::Error> {
        let mut release = NewRelease::new(&req.name, req.date)?;
        if let Some(time) = req.time {
            release = release.with_time(&time)?;
        }
        if let Some(price) = req.price {
            release = release.with_price(price)?;
        }
        release.brand = req.brand.filter(|b| !b.trim().is_empty());
        release.image_url = req.image_url;
        release.url = req.url;
        if let Some(category) = req.category.filter(|c| !c.trim().is_empty()) {
            release.category = category;
        }
        release.hot = req.hot;
        Ok(release)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteReleaseResponse {
    deleted: bool,
}

pub(super) async fn list_releases(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Release>>> {
    ApiResponse::new(state.store.all_releases().await, req_id.0)
}

pub(super) async fn upcoming_releases(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<UpcomingQuery>,
) -> Json<ApiResponse<Vec<Release>>> {
    let days = query.days.filter(|d| *d > 0).unwrap_or(DEFAULT_UPCOMING_DAYS);
    ApiResponse::new(state.store.upcoming_releases(days).await, req_id.0)
}

pub(super) async fn todays_releases(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Release>>> {
    ApiResponse::new(state.store.todays_releases().await, req_id.0)
}

pub(super) async fn add_release(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AddReleaseRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Release>>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::validation(req_id.0.clone(), e.body_text()))?;
    let release = NewRelease::try_from(body)
        .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?;

    let stored = state.store.add_release(release).await;
    tracing::debug!(id = stored.id, name = %stored.name, date = %stored.date, "release added");
    Ok(ApiResponse::new(stored, req_id.0))
}

pub(super) async fn delete_release(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<DeleteReleaseResponse>>, ApiError> {
    if !state.store.delete_release(id).await {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no release with id {id}"),
        ));
    }
    Ok(ApiResponse::new(DeleteReleaseResponse { deleted: true }, req_id.0))
}
