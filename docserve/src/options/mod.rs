//! Conversion request options.
//!
//! [`OptionsSchema`] turns an untyped JSON payload into an immutable
//! [`ConvertDocumentsRequestOptions`]. The schema is built once at startup from
//! the OCR engine registry and server policy, then shared by every request.

pub mod base;
mod request;
mod schema;

pub use base::ConvertDocumentsOptions;
pub use request::ConvertDocumentsRequestOptions;
pub use schema::{OptionsSchema, DOCUMENT_TIMEOUT, OCR_ENGINE, OCR_LANG};
