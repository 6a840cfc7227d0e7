//! Upstream API key status endpoint.

use axum::extract::State;
use axum::{Extension, Json};

use asolens_report::{check_api_status, StatusReport};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

/// Probes the configured OpenAI and Pexels keys with lightweight requests.
pub(super) async fn api_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<StatusReport>> {
    let report = check_api_status(&state.config).await;

    Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    })
}
