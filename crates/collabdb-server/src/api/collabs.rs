use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use collabdb_core::{CollaborationRecord, CoreError, NewCollaboration, COLLAB_CATEGORY};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState};

const MANUAL_SOURCE: &str = "manual";

#[derive(Debug, Deserialize)]
pub(super) struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
}

/// Manually submitted collaboration. Only `title` and `brands` are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SubmitCollabRequest {
    pub title: String,
    pub brands: Vec<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub hot: bool,
}

impl TryFrom<SubmitCollabRequest> for NewCollaboration {
    type Error = CoreError;

    fn try_from(req: SubmitCollabRequest) -> Result<Self, Self::Error> {
        Self::new(
            &req.title,
            req.brands,
            req.source.unwrap_or_else(|| MANUAL_SOURCE.to_string()),
            req.source_url.unwrap_or_default(),
            req.image_url,
            req.category.unwrap_or_else(|| COLLAB_CATEGORY.to_string()),
            req.hot,
        )
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SubmitCollabResponse {
    accepted: bool,
}

pub(super) async fn list_collabs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CollaborationRecord>>> {
    ApiResponse::new(state.store.all_collabs().await, req_id.0)
}

pub(super) async fn latest_collabs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LimitQuery>,
) -> Json<ApiResponse<Vec<CollaborationRecord>>> {
    let limit = normalize_limit(query.limit);
    ApiResponse::new(state.store.latest_collabs(limit).await, req_id.0)
}

pub(super) async fn hot_collabs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CollaborationRecord>>> {
    ApiResponse::new(state.store.hot_collabs().await, req_id.0)
}

pub(super) async fn search_collabs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<CollaborationRecord>>>, ApiError> {
    let q = query.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(ApiError::validation(req_id.0, "query parameter q must be non-empty"));
    }
    // Matching uses the raw query; only the trending key is normalized.
    let results = state.store.search_collabs(&q).await;
    Ok(ApiResponse::new(results, req_id.0))
}

pub(super) async fn submit_collab(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SubmitCollabRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SubmitCollabResponse>>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::validation(req_id.0.clone(), e.body_text()))?;
    let collab = NewCollaboration::try_from(body)
        .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?;

    let accepted = state.store.submit_collab(collab).await;
    Ok(ApiResponse::new(SubmitCollabResponse { accepted }, req_id.0))
}
