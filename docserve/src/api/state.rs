use std::sync::Arc;

use utoipa::openapi::OpenApi;

use crate::config::Config;
use crate::options::OptionsSchema;

use super::v1::openapi::build_openapi;

/// Shared, read-only state. Everything here is fixed before the server
/// starts accepting requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub schema: Arc<OptionsSchema>,
    pub openapi: Arc<OpenApi>,
}

impl AppState {
    pub fn new(config: Config, schema: OptionsSchema) -> Self {
        let openapi = build_openapi(&schema);
        Self {
            config: Arc::new(config),
            schema: Arc::new(schema),
            openapi: Arc::new(openapi),
        }
    }
}
