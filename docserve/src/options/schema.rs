use serde_json::{json, Map, Value};
use utoipa::openapi::schema::{
    AllOfBuilder, ArrayBuilder, KnownFormat, ObjectBuilder, Schema, SchemaFormat, SchemaType,
    Type,
};
use utoipa::openapi::Ref;
use validator::{Validate, ValidationError, ValidationErrors};

use super::base::ConvertDocumentsOptions;
use super::request::ConvertDocumentsRequestOptions;
use crate::config::ConversionConfig;
use crate::engines::{EngineChoices, EngineKey, EngineRegistry};
use crate::error::{ConfigurationError, OptionsError};

pub const OCR_ENGINE: &str = "ocr_engine";
pub const OCR_LANG: &str = "ocr_lang";
pub const DOCUMENT_TIMEOUT: &str = "document_timeout";

const EXTENSION_FIELDS: [&str; 3] = [OCR_ENGINE, OCR_LANG, DOCUMENT_TIMEOUT];

const OCR_LANG_DESCRIPTION: &str = "List of languages used by the OCR engine. \
Note that each OCR engine has different values for the language names. \
Optional, defaults to the engine's own language setting.";

const DOCUMENT_TIMEOUT_DESCRIPTION: &str =
    "The timeout for processing each document, in seconds.";

/// Validates inbound conversion option payloads.
///
/// Holds the frozen OCR engine choices and the server's maximum document
/// timeout, both fixed when the schema is built. Validation reads nothing
/// else, so one schema can be shared across threads and tested with any
/// bound.
#[derive(Debug, Clone)]
pub struct OptionsSchema {
    engines: EngineChoices,
    max_document_timeout: f64,
}

impl OptionsSchema {
    pub fn new(
        engines: EngineChoices,
        max_document_timeout: f64,
    ) -> Result<Self, ConfigurationError> {
        if !max_document_timeout.is_finite() || max_document_timeout <= 0.0 {
            return Err(ConfigurationError::InvalidTimeoutBound(max_document_timeout));
        }

        Ok(Self {
            engines,
            max_document_timeout,
        })
    }

    /// Query the registry once and build the schema from server policy.
    pub fn from_registry(
        registry: &dyn EngineRegistry,
        policy: &ConversionConfig,
    ) -> Result<Self, ConfigurationError> {
        let engines = EngineChoices::from_registry(registry, policy.allow_external_plugins)?;
        Self::new(engines, policy.max_document_timeout)
    }

    pub fn engines(&self) -> &EngineChoices {
        &self.engines
    }

    pub fn max_document_timeout(&self) -> f64 {
        self.max_document_timeout
    }

    /// Options used when the caller supplies nothing.
    pub fn defaults(&self) -> ConvertDocumentsRequestOptions {
        ConvertDocumentsRequestOptions::new(
            ConvertDocumentsOptions::default(),
            self.engines.default_key().to_string(),
            None,
            self.max_document_timeout,
        )
    }

    /// Validate a payload, returning the first problem found.
    pub fn validate(&self, payload: &Value) -> Result<ConvertDocumentsRequestOptions, OptionsError> {
        match self.validate_all(payload) {
            Ok(options) => Ok(options),
            // validate_all never fails with an empty list
            Err(mut errors) => Err(errors.remove(0)),
        }
    }

    /// Validate a payload, reporting every invalid field.
    ///
    /// Fields are checked independently; base fields come first, then
    /// `ocr_engine`, `ocr_lang` and `document_timeout`.
    pub fn validate_all(
        &self,
        payload: &Value,
    ) -> Result<ConvertDocumentsRequestOptions, Vec<OptionsError>> {
        let Some(fields) = payload.as_object() else {
            return Err(vec![type_mismatch("body", "object")]);
        };

        let mut errors = Vec::new();

        let base = parse_base(fields, &mut errors);
        let ocr_engine = self
            .parse_ocr_engine(fields.get(OCR_ENGINE))
            .map_err(|e| errors.push(e))
            .ok();
        let ocr_lang = parse_ocr_lang(fields.get(OCR_LANG))
            .map_err(|e| errors.push(e))
            .ok();
        let document_timeout = self
            .parse_document_timeout(fields.get(DOCUMENT_TIMEOUT))
            .map_err(|e| errors.push(e))
            .ok();

        match (base, ocr_engine, ocr_lang, document_timeout) {
            (Some(base), Some(ocr_engine), Some(ocr_lang), Some(document_timeout))
                if errors.is_empty() =>
            {
                Ok(ConvertDocumentsRequestOptions::new(
                    base,
                    ocr_engine,
                    ocr_lang,
                    document_timeout,
                ))
            }
            _ => Err(errors),
        }
    }

    fn parse_ocr_engine(&self, value: Option<&Value>) -> Result<EngineKey, OptionsError> {
        match value {
            None => Ok(self.engines.default_key().to_string()),
            Some(Value::String(kind)) => self
                .engines
                .resolve(kind)
                .cloned()
                .ok_or_else(|| self.invalid_engine(kind.clone())),
            Some(other) => Err(self.invalid_engine(other.to_string())),
        }
    }

    fn invalid_engine(&self, value: String) -> OptionsError {
        OptionsError::InvalidChoice {
            field: OCR_ENGINE.to_string(),
            value,
            allowed: self.engines.keys().to_vec(),
        }
    }

    fn parse_document_timeout(&self, value: Option<&Value>) -> Result<f64, OptionsError> {
        let timeout = match value {
            None => return Ok(self.max_document_timeout),
            Some(Value::Number(number)) => number
                .as_f64()
                .ok_or_else(|| type_mismatch(DOCUMENT_TIMEOUT, "number"))?,
            Some(_) => return Err(type_mismatch(DOCUMENT_TIMEOUT, "number")),
        };

        if timeout > 0.0 && timeout <= self.max_document_timeout {
            Ok(timeout)
        } else {
            Err(OptionsError::OutOfRange {
                field: DOCUMENT_TIMEOUT.to_string(),
                value: timeout,
                max: self.max_document_timeout,
            })
        }
    }

    /// OpenAPI schema for [`ConvertDocumentsRequestOptions`]: the static base
    /// options plus the OCR fields, whose allowed values and bounds come from
    /// this schema.
    pub fn openapi_schema(&self) -> Schema {
        let default_engine = self.engines.default_key();

        let ocr_engine = ObjectBuilder::new()
            .schema_type(Type::String)
            .description(Some(self.engines.description()))
            .enum_values(Some(self.engines.keys().iter().cloned()))
            .default(Some(json!(default_engine)))
            .examples([json!(default_engine)]);

        let ocr_lang = ArrayBuilder::new()
            .schema_type(SchemaType::from_iter([Type::Array, Type::Null]))
            .items(ObjectBuilder::new().schema_type(Type::String))
            .description(Some(OCR_LANG_DESCRIPTION))
            .examples([json!(["en", "fr", "de", "es"])]);

        let document_timeout = ObjectBuilder::new()
            .schema_type(Type::Number)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Double)))
            .description(Some(DOCUMENT_TIMEOUT_DESCRIPTION))
            .exclusive_minimum(Some(0.0))
            .maximum(Some(self.max_document_timeout))
            .default(Some(json!(self.max_document_timeout)));

        let extension = ObjectBuilder::new()
            .property(OCR_ENGINE, ocr_engine)
            .property(OCR_LANG, ocr_lang)
            .property(DOCUMENT_TIMEOUT, document_timeout);

        Schema::AllOf(
            AllOfBuilder::new()
                .item(Ref::from_schema_name("ConvertDocumentsOptions"))
                .item(extension)
                .description(Some("Options for a document conversion request."))
                .build(),
        )
    }
}

/// Deserialize the base option fields, pushing one error per bad field.
fn parse_base(
    fields: &Map<String, Value>,
    errors: &mut Vec<OptionsError>,
) -> Option<ConvertDocumentsOptions> {
    let before = errors.len();
    let mut base_fields = Map::new();

    for (key, value) in fields {
        if EXTENSION_FIELDS.contains(&key.as_str()) {
            continue;
        }
        // Deserialized alone so a serde failure can be tied to its field.
        let single = Value::Object(Map::from_iter([(key.clone(), value.clone())]));
        if let Err(e) = serde_json::from_value::<ConvertDocumentsOptions>(single) {
            errors.push(OptionsError::InvalidField {
                field: key.clone(),
                message: e.to_string(),
            });
            continue;
        }
        base_fields.insert(key.clone(), value.clone());
    }

    if errors.len() > before {
        return None;
    }

    let options: ConvertDocumentsOptions = match serde_json::from_value(Value::Object(base_fields))
    {
        Ok(options) => options,
        Err(e) => {
            errors.push(OptionsError::InvalidField {
                field: "body".to_string(),
                message: e.to_string(),
            });
            return None;
        }
    };

    if let Err(validation) = options.validate() {
        errors.extend(validation_errors(&validation));
    }
    if let Err(message) = options.check_page_range() {
        errors.push(OptionsError::InvalidField {
            field: "page_range".to_string(),
            message,
        });
    }

    (errors.len() == before).then_some(options)
}

fn parse_ocr_lang(value: Option<&Value>) -> Result<Option<Vec<String>>, OptionsError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(Some)
            .ok_or_else(|| type_mismatch(OCR_LANG, "array of strings")),
        Some(_) => Err(type_mismatch(OCR_LANG, "array of strings")),
    }
}

fn type_mismatch(field: &str, expected: &str) -> OptionsError {
    OptionsError::TypeMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
    }
}

fn validation_errors(errors: &ValidationErrors) -> Vec<OptionsError> {
    let mut out: Vec<OptionsError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| OptionsError::InvalidField {
                field: field.to_string(),
                message: describe_validation_error(err),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field().cmp(b.field()));
    out
}

fn describe_validation_error(err: &ValidationError) -> String {
    match (
        err.params.get("min"),
        err.params.get("max"),
        err.params.get("value"),
    ) {
        (Some(min), Some(max), Some(value)) => {
            format!("must be between {min} and {max}, got {value}")
        }
        _ => err
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string()),
    }
}
