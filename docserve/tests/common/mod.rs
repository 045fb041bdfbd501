// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Once;

use docserve::config::ConversionConfig;
use docserve::engines::{EnginePlugin, StaticEngineRegistry};
use docserve::options::OptionsSchema;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Registry with only first-party engines.
pub fn first_party_registry(kinds: &[&str], default: &str) -> StaticEngineRegistry {
    StaticEngineRegistry::new(
        kinds.iter().map(|k| EnginePlugin::first_party(*k)).collect(),
        default,
    )
}

/// Schema over `{easyocr, tesseract}` with the given timeout bound.
pub fn schema_with_bound(max_document_timeout: f64) -> OptionsSchema {
    init_test_logger();
    let policy = ConversionConfig {
        max_document_timeout,
        allow_external_plugins: false,
    };
    OptionsSchema::from_registry(
        &first_party_registry(&["easyocr", "tesseract"], "easyocr"),
        &policy,
    )
    .expect("schema should build")
}
