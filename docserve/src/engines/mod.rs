//! OCR engine discovery.
//!
//! The set of OCR engines a request may select is decided once, at startup:
//!
//! - [`EngineRegistry`] enumerates installed engine plugins by their `kind`
//!   key and names the default engine.
//! - [`EngineChoices`] freezes that enumeration into the closed set of legal
//!   keys used by request validation for the rest of the process lifetime.
//!
//! The shipped registry, [`StaticEngineRegistry`], is backed by configuration
//! (see `OcrEngineConfig`).

mod choices;
mod registry;

pub use choices::EngineChoices;
pub use registry::{EngineOrigin, EnginePlugin, EngineRegistry, StaticEngineRegistry};

/// Stable string identifier of an OCR engine plugin, e.g. `"easyocr"`.
pub type EngineKey = String;

/// Engine kinds shipped with the conversion pipeline itself.
pub const FIRST_PARTY_ENGINES: &[&str] =
    &["easyocr", "ocrmac", "rapidocr", "tesserocr", "tesseract"];
