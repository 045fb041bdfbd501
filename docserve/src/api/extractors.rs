use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::api::state::AppState;
use crate::error::DocserveError;
use crate::options::ConvertDocumentsRequestOptions;

/// Conversion options validated against the process-wide schema.
///
/// Rejects the request with `400 invalid_request` listing every bad field.
pub struct ValidatedOptions(pub ConvertDocumentsRequestOptions);

impl FromRequest<AppState> for ValidatedOptions {
    type Rejection = DocserveError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state).await?;
        let options = state
            .schema
            .validate_all(&payload)
            .map_err(DocserveError::InvalidOptions)?;
        Ok(Self(options))
    }
}

impl From<JsonRejection> for DocserveError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> DocserveError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return DocserveError::PayloadTooLarge(rejection.body_text());
    }

    match rejection {
        JsonRejection::JsonDataError(err) => {
            DocserveError::Validation(format!("Invalid JSON: {err}"))
        }
        JsonRejection::JsonSyntaxError(err) => {
            DocserveError::Validation(format!("JSON syntax error: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => DocserveError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(err) => {
            DocserveError::Validation(format!("Failed to read request body: {err}"))
        }
        _ => DocserveError::Validation(rejection.to_string()),
    }
}
