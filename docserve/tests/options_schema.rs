mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use docserve::config::ConversionConfig;
use docserve::engines::{EngineChoices, EnginePlugin, EngineRegistry, StaticEngineRegistry};
use docserve::error::{ConfigurationError, OptionsError};
use docserve::options::OptionsSchema;

use common::{first_party_registry, schema_with_bound};

#[test]
fn test_scenario_timeout_at_bound_is_accepted() {
    let schema = schema_with_bound(600.0);
    let options = schema.validate(&json!({ "document_timeout": 600 })).unwrap();
    assert_eq!(options.document_timeout(), 600.0);
}

#[test]
fn test_scenario_timeout_just_over_bound_is_rejected() {
    let schema = schema_with_bound(600.0);
    let err = schema
        .validate(&json!({ "document_timeout": 600.0001 }))
        .unwrap_err();
    assert!(matches!(err, OptionsError::OutOfRange { .. }), "{err:?}");
    assert_eq!(err.field(), "document_timeout");
}

#[test]
fn test_scenario_legal_engine_is_accepted() {
    let schema = schema_with_bound(600.0);
    let options = schema.validate(&json!({ "ocr_engine": "tesseract" })).unwrap();
    assert_eq!(options.ocr_engine(), "tesseract");
}

#[test]
fn test_scenario_unknown_engine_is_invalid_choice() {
    let schema = schema_with_bound(600.0);
    let err = schema
        .validate(&json!({ "ocr_engine": "ocrmypdf" }))
        .unwrap_err();
    assert_eq!(
        err,
        OptionsError::InvalidChoice {
            field: "ocr_engine".to_string(),
            value: "ocrmypdf".to_string(),
            allowed: vec!["easyocr".to_string(), "tesseract".to_string()],
        }
    );
}

#[test]
fn test_omitted_fields_take_defaults() {
    let schema = schema_with_bound(600.0);
    let options = schema.validate(&json!({})).unwrap();

    assert_eq!(options.ocr_engine(), schema.engines().default_key());
    assert_eq!(options.document_timeout(), schema.max_document_timeout());
    assert!(options.ocr_lang().is_none());
}

#[test]
fn test_ocr_lang_shapes() {
    let schema = schema_with_bound(600.0);

    let options = schema
        .validate(&json!({ "ocr_lang": ["en", "fr"] }))
        .unwrap();
    assert_eq!(
        options.ocr_lang().unwrap(),
        &["en".to_string(), "fr".to_string()]
    );

    let err = schema.validate(&json!({ "ocr_lang": [1, 2] })).unwrap_err();
    assert!(matches!(err, OptionsError::TypeMismatch { .. }), "{err:?}");
}

#[test]
fn test_zero_engines_fail_before_any_validation() {
    let registry = first_party_registry(&[], "easyocr");
    let result = OptionsSchema::from_registry(&registry, &ConversionConfig::default());
    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::NoEngines {
            allow_external: false
        }
    );
}

#[test]
fn test_external_plugins_follow_policy() {
    let registry = StaticEngineRegistry::new(
        vec![
            EnginePlugin::first_party("easyocr"),
            EnginePlugin::external("surya"),
        ],
        "easyocr",
    );

    let closed = OptionsSchema::from_registry(
        &registry,
        &ConversionConfig {
            max_document_timeout: 600.0,
            allow_external_plugins: false,
        },
    )
    .unwrap();
    assert!(closed.validate(&json!({ "ocr_engine": "surya" })).is_err());

    let open = OptionsSchema::from_registry(
        &registry,
        &ConversionConfig {
            max_document_timeout: 600.0,
            allow_external_plugins: true,
        },
    )
    .unwrap();
    let options = open.validate(&json!({ "ocr_engine": "surya" })).unwrap();
    assert_eq!(options.ocr_engine(), "surya");
}

/// Registry whose answer depends on the external-plugin flag.
struct ShiftingRegistry;

impl EngineRegistry for ShiftingRegistry {
    fn enumerate(&self, allow_external: bool) -> Vec<String> {
        if allow_external {
            vec!["easyocr".to_string(), "surya".to_string()]
        } else {
            vec!["easyocr".to_string()]
        }
    }

    fn default_key(&self) -> String {
        "easyocr".to_string()
    }
}

#[test]
fn test_custom_registry_with_external_engines() {
    let choices = EngineChoices::from_registry(&ShiftingRegistry, true).unwrap();
    let schema = OptionsSchema::new(choices, 30.0).unwrap();

    for key in ["easyocr", "surya"] {
        let options = schema.validate(&json!({ "ocr_engine": key })).unwrap();
        assert_eq!(options.ocr_engine(), key);
    }
    assert_eq!(schema.engines().keys(), ["easyocr", "surya"]);
}
