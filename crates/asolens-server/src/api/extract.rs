//! Single-listing extraction endpoint.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use asolens_core::{AppListing, Platform};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ExtractRequest {
    pub url: String,
    pub platform: Platform,
}

/// Extracts one store listing. Unreachable or unparseable pages yield the
/// all-empty record rather than an error, matching the scraper contract.
pub(super) async fn extract_listing(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<ExtractRequest>,
) -> Json<ApiResponse<AppListing>> {
    let listing = state
        .scraper
        .extract_app_data(&request.url, request.platform)
        .await;

    Json(ApiResponse {
        data: listing,
        meta: ResponseMeta::new(req_id.0),
    })
}
