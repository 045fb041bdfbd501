use serde::Serialize;

use super::base::ConvertDocumentsOptions;
use crate::engines::EngineKey;

/// Validated options for one conversion request.
///
/// Instances only come out of [`OptionsSchema`](super::OptionsSchema), so every
/// field already satisfies its constraints. There are no setters.
///
/// Serializes flat: base option fields sit next to the OCR fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertDocumentsRequestOptions {
    #[serde(flatten)]
    base: ConvertDocumentsOptions,
    ocr_engine: EngineKey,
    ocr_lang: Option<Vec<String>>,
    document_timeout: f64,
}

impl ConvertDocumentsRequestOptions {
    /// Component name used in the OpenAPI document.
    pub const SCHEMA_NAME: &'static str = "ConvertDocumentsRequestOptions";

    pub(crate) fn new(
        base: ConvertDocumentsOptions,
        ocr_engine: EngineKey,
        ocr_lang: Option<Vec<String>>,
        document_timeout: f64,
    ) -> Self {
        Self {
            base,
            ocr_engine,
            ocr_lang,
            document_timeout,
        }
    }

    pub fn base(&self) -> &ConvertDocumentsOptions {
        &self.base
    }

    pub fn ocr_engine(&self) -> &str {
        &self.ocr_engine
    }

    /// `None` means "use the engine's default languages".
    pub fn ocr_lang(&self) -> Option<&[String]> {
        self.ocr_lang.as_deref()
    }

    /// Seconds the pipeline may spend on each document.
    pub fn document_timeout(&self) -> f64 {
        self.document_timeout
    }
}
