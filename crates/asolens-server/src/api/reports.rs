//! Report generation and image enrichment endpoints.

use std::time::Duration;

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use asolens_core::ReportRequest;
use asolens_report::schema::AsoReport;
use asolens_report::{enrich_report, LlmClient, PexelsClient, ReportBundle, ReportPipeline};

use crate::middleware::RequestId;

use super::{map_report_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Runs the full report pipeline over the posted request profile.
pub(super) async fn generate_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ApiResponse<ReportBundle>>, ApiError> {
    if let Err(error) = request.validate() {
        return Err(ApiError::new(req_id.0, "validation_error", error.to_string()));
    }

    let Some(api_key) = state.config.openai_api_key.as_deref() else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "missing OpenAI API key",
        ));
    };

    let llm = LlmClient::with_base_url(
        api_key,
        &state.config.openai_model,
        &state.config.openai_base_url,
    )
    .map_err(|error| map_report_error(req_id.0.clone(), &error))?;

    let pipeline = ReportPipeline::new(
        state.scraper.clone(),
        llm,
        state.config.max_concurrent_extractions,
    );
    let bundle = pipeline
        .run(&request)
        .await
        .map_err(|error| map_report_error(req_id.0.clone(), &error))?;

    Ok(Json(ApiResponse {
        data: bundle,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct EnrichRequest {
    pub report: AsoReport,
    pub country: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EnrichData {
    pub report: AsoReport,
    pub images_added: usize,
}

/// Fills the report's missing image slots via photo search. Without a
/// configured Pexels key the report comes back unchanged.
pub(super) async fn enrich_images(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<EnrichRequest>,
) -> Result<Json<ApiResponse<EnrichData>>, ApiError> {
    let EnrichRequest {
        mut report,
        country,
    } = request;

    let images_added = match state.config.pexels_api_key.as_deref() {
        Some(key) => {
            let client = PexelsClient::with_base_url(key, &state.config.pexels_base_url)
                .map_err(|error| map_report_error(req_id.0.clone(), &error))?;
            enrich_report(
                &mut report,
                &country,
                &client,
                Duration::from_millis(state.config.enrich_delay_ms),
            )
            .await
        }
        None => {
            tracing::warn!("PEXELS_API_KEY not set, returning report unchanged");
            0
        }
    };

    Ok(Json(ApiResponse {
        data: EnrichData {
            report,
            images_added,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
