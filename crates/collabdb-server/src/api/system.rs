//! Health, scan control, stats, trending and the brand list.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use collabdb_core::{ScanStatsSnapshot, TrendingEntry, BRANDS};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::scan::ScanOutcome;

use super::{normalize_limit, ApiResponse, AppState};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct HealthData {
    status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ScanResponse {
    status: &'static str,
    articles: usize,
    detected: usize,
    new_collabs: usize,
}

impl From<ScanOutcome> for ScanResponse {
    fn from(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Completed(report) => Self {
                status: "completed",
                articles: report.articles,
                detected: report.detected,
                new_collabs: report.accepted,
            },
            ScanOutcome::Queued => Self {
                status: "queued",
                articles: 0,
                detected: 0,
                new_collabs: 0,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TrendingQuery {
    pub limit: Option<usize>,
}

pub(super) async fn health(Extension(req_id): Extension<RequestId>) -> Json<ApiResponse<HealthData>> {
    ApiResponse::new(HealthData { status: "ok" }, req_id.0)
}

pub(super) async fn scan_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ScanStatsSnapshot>> {
    ApiResponse::new(state.store.scan_stats().await, req_id.0)
}

pub(super) async fn list_brands(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<&'static [&'static str]>> {
    ApiResponse::new(BRANDS, req_id.0)
}

pub(super) async fn trigger_scan(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ScanResponse>> {
    tracing::info!(request_id = %req_id.0, "scan requested via API");
    let outcome = state.scanner.trigger().await;
    ApiResponse::new(ScanResponse::from(outcome), req_id.0)
}

pub(super) async fn trending(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TrendingQuery>,
) -> Json<ApiResponse<Vec<TrendingEntry>>> {
    let limit = normalize_limit(query.limit);
    ApiResponse::new(state.store.trending(limit).await, req_id.0)
}
