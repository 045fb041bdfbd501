use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;

/// Health data returned inside the v1 envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub ocr: OcrStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct OcrStatus {
    pub engines: usize,
    pub default_engine: String,
    pub allow_external_plugins: bool,
    pub max_document_timeout: f64,
}

/// `GET /api/v1/health`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let engines = state.schema.engines();

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ocr: OcrStatus {
            engines: engines.len(),
            default_engine: engines.default_key().to_string(),
            allow_external_plugins: state.config.conversion.allow_external_plugins,
            max_document_timeout: state.schema.max_document_timeout(),
        },
    })
}
