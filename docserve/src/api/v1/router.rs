use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ocr-engines", get(handlers::list_engines))
        .route(
            "/convert/options:validate",
            post(handlers::validate_options),
        )
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router(state.openapi.as_ref().clone()))
}
