use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::v1::response::{ApiResponse, ErrorCode, FieldError};

/// Startup-time failures. The server must not start serving while one of
/// these is unresolved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("No OCR engines are available (allow_external_plugins={allow_external})")]
    NoEngines { allow_external: bool },

    #[error("Default OCR engine '{default}' is not among the available engines: {}", .available.join(", "))]
    DefaultEngineUnavailable {
        default: String,
        available: Vec<String>,
    },

    #[error("max_document_timeout must be a positive, finite number of seconds, got {0}")]
    InvalidTimeoutBound(f64),
}

/// Per-request validation failures for conversion options.
///
/// Every variant names the offending field so callers can point at it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("Invalid value '{value}' for {field}. Allowed values: {}", .allowed.join(", "))]
    InvalidChoice {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Invalid type for {field}: expected {expected}")]
    TypeMismatch { field: String, expected: String },

    #[error("{field} must be greater than 0 and at most {max}, got {value}")]
    OutOfRange { field: String, value: f64, max: f64 },

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },
}

impl OptionsError {
    pub fn field(&self) -> &str {
        match self {
            OptionsError::InvalidChoice { field, .. }
            | OptionsError::TypeMismatch { field, .. }
            | OptionsError::OutOfRange { field, .. }
            | OptionsError::InvalidField { field, .. } => field,
        }
    }
}

#[derive(Error, Debug)]
pub enum DocserveError {
    #[error("{}", join_errors(.0))]
    InvalidOptions(Vec<OptionsError>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

fn join_errors(errors: &[OptionsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<OptionsError> for DocserveError {
    fn from(err: OptionsError) -> Self {
        DocserveError::InvalidOptions(vec![err])
    }
}

impl IntoResponse for DocserveError {
    fn into_response(self) -> Response {
        match self {
            DocserveError::InvalidOptions(errors) => {
                let message = join_errors(&errors);
                tracing::debug!("Rejected conversion options: {}", message);

                let details: Vec<FieldError> = errors
                    .iter()
                    .map(|err| FieldError {
                        field: err.field().to_string(),
                        message: err.to_string(),
                    })
                    .collect();
                let mut response = ApiResponse::<()>::error(ErrorCode::InvalidRequest, message);
                if let Some(first) = details.first() {
                    response = response.with_field(first.field.clone());
                }
                response.with_details(details).into_response()
            }
            DocserveError::Validation(msg) => {
                ApiResponse::<()>::error(ErrorCode::InvalidRequest, msg).into_response()
            }
            DocserveError::PayloadTooLarge(msg) => {
                ApiResponse::<()>::error(ErrorCode::PayloadTooLarge, msg).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_options_error_field() {
        let err = OptionsError::OutOfRange {
            field: "document_timeout".to_string(),
            value: -1.0,
            max: 600.0,
        };
        assert_eq!(err.field(), "document_timeout");
    }

    #[test]
    fn test_invalid_choice_message_lists_allowed_values() {
        let err = OptionsError::InvalidChoice {
            field: "ocr_engine".to_string(),
            value: "ocrmypdf".to_string(),
            allowed: vec!["easyocr".to_string(), "tesseract".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid value 'ocrmypdf' for ocr_engine. Allowed values: easyocr, tesseract"
        );
    }

    #[test]
    fn test_default_engine_unavailable_message() {
        let err = ConfigurationError::DefaultEngineUnavailable {
            default: "easyocr".to_string(),
            available: vec!["tesseract".to_string()],
        };
        assert!(err.to_string().contains("'easyocr'"));
        assert!(err.to_string().contains("tesseract"));
    }

    #[test]
    fn test_options_error_maps_to_bad_request() {
        let err = DocserveError::from(OptionsError::TypeMismatch {
            field: "ocr_lang".to_string(),
            expected: "array of strings".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_multiple_option_errors_are_joined() {
        let err = DocserveError::InvalidOptions(vec![
            OptionsError::TypeMismatch {
                field: "ocr_lang".to_string(),
                expected: "array of strings".to_string(),
            },
            OptionsError::OutOfRange {
                field: "document_timeout".to_string(),
                value: 0.0,
                max: 600.0,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid type for ocr_lang: expected array of strings; \
             document_timeout must be greater than 0 and at most 600, got 0"
        );
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let err = DocserveError::PayloadTooLarge("length limit exceeded".to_string());
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
