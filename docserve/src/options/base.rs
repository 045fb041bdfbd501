//! Base conversion options shared by every conversion request.
//!
//! These fields are static: their valid values do not depend on which OCR
//! engines are installed or on server policy. Every field has a default, so an
//! empty payload is a valid set of base options.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input document formats the converter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    Docx,
    Pptx,
    Html,
    Image,
    Pdf,
    Asciidoc,
    Md,
    Csv,
    Xlsx,
    XmlUspto,
    XmlJats,
    JsonDocling,
}

impl InputFormat {
    pub const ALL: [InputFormat; 12] = [
        InputFormat::Docx,
        InputFormat::Pptx,
        InputFormat::Html,
        InputFormat::Image,
        InputFormat::Pdf,
        InputFormat::Asciidoc,
        InputFormat::Md,
        InputFormat::Csv,
        InputFormat::Xlsx,
        InputFormat::XmlUspto,
        InputFormat::XmlJats,
        InputFormat::JsonDocling,
    ];
}

/// Output formats the converter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Md,
    Json,
    Html,
    HtmlSplitPage,
    Text,
    Doctags,
}

/// How images are represented in exported documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageRefMode {
    Placeholder,
    #[default]
    Embedded,
    Referenced,
}

/// PDF parsing backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PdfBackend {
    Pypdfium2,
    DlparseV1,
    DlparseV2,
    #[default]
    DlparseV4,
}

/// Table structure recognition mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TableFormerMode {
    Fast,
    #[default]
    Accurate,
}

/// Conversion pipeline flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingPipeline {
    #[default]
    Standard,
    Vlm,
    Asr,
}

/// Options every conversion request carries, independent of OCR engine
/// selection.
///
/// Wire format (all fields optional):
/// ```json
/// { "to_formats": ["md", "json"], "do_ocr": true, "page_range": [1, 10] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(default)]
pub struct ConvertDocumentsOptions {
    /// Input formats to accept. Defaults to all supported formats.
    pub from_formats: Vec<InputFormat>,
    /// Output formats to produce. Defaults to `["md"]`.
    pub to_formats: Vec<OutputFormat>,
    /// Image export mode for the document. Defaults to `embedded`.
    pub image_export_mode: ImageRefMode,
    /// Run OCR on bitmap content. Defaults to `true`.
    pub do_ocr: bool,
    /// Replace existing text layers with OCR output. Defaults to `false`.
    pub force_ocr: bool,
    /// PDF backend to use. Defaults to `dlparse_v4`.
    pub pdf_backend: PdfBackend,
    /// Table structure recognition mode. Defaults to `accurate`.
    pub table_mode: TableFormerMode,
    /// Match table cells predicted by the model back to PDF cells.
    pub table_cell_matching: bool,
    /// Processing pipeline. Defaults to `standard`.
    pub pipeline: ProcessingPipeline,
    /// 1-based inclusive `[start, end]` page range to convert.
    #[schema(value_type = Vec<u32>, example = json!([1, 10]))]
    pub page_range: (u32, u32),
    /// Abort the whole request on the first document error.
    pub abort_on_error: bool,
    /// Extract table structure. Defaults to `true`.
    pub do_table_structure: bool,
    /// Extract page and picture images. Defaults to `true`.
    pub include_images: bool,
    /// Scale factor for exported images.
    #[validate(range(min = 0.1, max = 10.0))]
    pub images_scale: f64,
    /// Text inserted between pages in Markdown output.
    pub md_page_break_placeholder: String,
    /// Run the code block enrichment model.
    pub do_code_enrichment: bool,
    /// Run the formula enrichment model.
    pub do_formula_enrichment: bool,
    /// Run the picture classification model.
    pub do_picture_classification: bool,
    /// Run the picture description model.
    pub do_picture_description: bool,
    /// Minimum page area fraction a picture must cover to be described.
    #[validate(range(min = 0.0, max = 1.0))]
    pub picture_description_area_threshold: f64,
}

impl Default for ConvertDocumentsOptions {
    fn default() -> Self {
        Self {
            from_formats: InputFormat::ALL.to_vec(),
            to_formats: vec![OutputFormat::Md],
            image_export_mode: ImageRefMode::default(),
            do_ocr: true,
            force_ocr: false,
            pdf_backend: PdfBackend::default(),
            table_mode: TableFormerMode::default(),
            table_cell_matching: true,
            pipeline: ProcessingPipeline::default(),
            page_range: (1, u32::MAX),
            abort_on_error: false,
            do_table_structure: true,
            include_images: true,
            images_scale: 2.0,
            md_page_break_placeholder: String::new(),
            do_code_enrichment: false,
            do_formula_enrichment: false,
            do_picture_classification: false,
            do_picture_description: false,
            picture_description_area_threshold: 0.05,
        }
    }
}

impl ConvertDocumentsOptions {
    /// Checks `page_range`, which the derive cannot express.
    pub fn check_page_range(&self) -> Result<(), String> {
        let (start, end) = self.page_range;
        if start < 1 {
            return Err(format!("page numbers start at 1, got start={start}"));
        }
        if start > end {
            return Err(format!("start ({start}) must not exceed end ({end})"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_payload_uses_defaults() {
        let options: ConvertDocumentsOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ConvertDocumentsOptions::default());
        assert_eq!(options.to_formats, vec![OutputFormat::Md]);
        assert_eq!(options.from_formats.len(), 12);
        assert_eq!(options.pdf_backend, PdfBackend::DlparseV4);
    }

    #[test]
    fn test_wire_names_are_snake_case() {
        let json = r#"{
            "to_formats": ["html_split_page", "doctags"],
            "from_formats": ["xml_jats", "json_docling"],
            "pdf_backend": "pypdfium2",
            "table_mode": "fast",
            "image_export_mode": "referenced"
        }"#;
        let options: ConvertDocumentsOptions = serde_json::from_str(json).unwrap();
        assert_eq!(
            options.to_formats,
            vec![OutputFormat::HtmlSplitPage, OutputFormat::Doctags]
        );
        assert_eq!(
            options.from_formats,
            vec![InputFormat::XmlJats, InputFormat::JsonDocling]
        );
        assert_eq!(options.pdf_backend, PdfBackend::Pypdfium2);
        assert_eq!(options.table_mode, TableFormerMode::Fast);
        assert_eq!(options.image_export_mode, ImageRefMode::Referenced);
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let result: Result<ConvertDocumentsOptions, _> =
            serde_json::from_str(r#"{"to_formats": ["docx"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_range_parses_from_array() {
        let options: ConvertDocumentsOptions =
            serde_json::from_str(r#"{"page_range": [2, 5]}"#).unwrap();
        assert_eq!(options.page_range, (2, 5));
        assert!(options.check_page_range().is_ok());
    }

    #[test]
    fn test_page_range_rejects_inverted_and_zero() {
        let mut options = ConvertDocumentsOptions {
            page_range: (5, 2),
            ..Default::default()
        };
        assert!(options.check_page_range().is_err());

        options.page_range = (0, 2);
        assert!(options.check_page_range().is_err());
    }

    #[test]
    fn test_images_scale_range() {
        let options = ConvertDocumentsOptions {
            images_scale: 20.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
        assert!(ConvertDocumentsOptions::default().validate().is_ok());
    }
}
