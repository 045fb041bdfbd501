use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;

/// OCR engines a conversion request may select.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct EnginesResponse {
    /// Legal `ocr_engine` values, in registry order.
    pub engines: Vec<String>,
    /// Engine used when `ocr_engine` is omitted.
    pub default: String,
}

/// `GET /api/v1/ocr-engines`
#[utoipa::path(
    get,
    path = "/api/v1/ocr-engines",
    tag = "options",
    responses(
        (status = 200, description = "Available OCR engines", body = EnginesResponse),
    )
)]
pub async fn list_engines(State(state): State<AppState>) -> ApiResponse<EnginesResponse> {
    let engines = state.schema.engines();
    ApiResponse::success(EnginesResponse {
        engines: engines.keys().to_vec(),
        default: engines.default_key().to_string(),
    })
}
