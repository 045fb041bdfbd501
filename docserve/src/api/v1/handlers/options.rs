use crate::api::extractors::ValidatedOptions;
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::options::ConvertDocumentsRequestOptions;

/// `POST /api/v1/convert/options:validate`
///
/// Validates a conversion options payload and echoes it back with every
/// default filled in. The request body schema is registered at startup as
/// `ConvertDocumentsRequestOptions`, since its allowed engines and timeout
/// bound depend on server configuration.
#[utoipa::path(
    post,
    path = "/api/v1/convert/options:validate",
    tag = "options",
    responses(
        (status = 200, description = "Options are valid; normalized options returned"),
        (status = 400, description = "Options were rejected", body = ApiError),
    )
)]
pub async fn validate_options(
    ValidatedOptions(options): ValidatedOptions,
) -> ApiResponse<ConvertDocumentsRequestOptions> {
    tracing::debug!(
        ocr_engine = options.ocr_engine(),
        document_timeout = options.document_timeout(),
        "Accepted conversion options"
    );
    ApiResponse::success(options)
}
