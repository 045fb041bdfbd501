use axum::extract::State;
use axum::Json;
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::{ContentBuilder, Ref, RefOr, Required};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;
use super::response;
use crate::api::state::AppState;
use crate::options::{base, ConvertDocumentsRequestOptions, OptionsSchema};

const VALIDATE_OPTIONS_PATH: &str = "/api/v1/convert/options:validate";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docserve API",
        version = "1.0.0",
        description = "Validated request options for document conversion.",
    ),
    paths(
        handlers::health::health_check,
        handlers::engines::list_engines,
        handlers::options::validate_options,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::FieldError,
        // Base conversion options
        base::ConvertDocumentsOptions,
        base::InputFormat,
        base::OutputFormat,
        base::ImageRefMode,
        base::PdfBackend,
        base::TableFormerMode,
        base::ProcessingPipeline,
        // Handler-local types
        handlers::engines::EnginesResponse,
        handlers::health::HealthData,
        handlers::health::OcrStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "options", description = "Conversion option validation and OCR engine discovery"),
    ),
)]
pub struct ApiDoc;

/// Full OpenAPI document for this process.
///
/// The static document is completed with the `ConvertDocumentsRequestOptions`
/// component, whose allowed OCR engines and timeout bound come from `schema`,
/// and that component is wired in as the validation endpoint's request body.
pub fn build_openapi(schema: &OptionsSchema) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();

    let components = openapi.components.get_or_insert_with(Default::default);
    components.schemas.insert(
        ConvertDocumentsRequestOptions::SCHEMA_NAME.to_string(),
        RefOr::T(schema.openapi_schema()),
    );

    if let Some(operation) = openapi
        .paths
        .paths
        .get_mut(VALIDATE_OPTIONS_PATH)
        .and_then(|item| item.post.as_mut())
    {
        operation.request_body = Some(
            RequestBodyBuilder::new()
                .description(Some("Conversion options. Every field is optional."))
                .content(
                    "application/json",
                    ContentBuilder::new()
                        .schema(Some(Ref::from_schema_name(
                            ConvertDocumentsRequestOptions::SCHEMA_NAME,
                        )))
                        .build(),
                )
                .required(Some(Required::True))
                .build(),
        );
    }

    openapi
}

pub async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(state.openapi.as_ref().clone())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>(
    openapi: utoipa::openapi::OpenApi,
) -> axum::Router<S> {
    Redoc::with_url("/docs", openapi).into()
}
