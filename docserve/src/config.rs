use serde::Deserialize;
use std::env;

use crate::engines::FIRST_PARTY_ENGINES;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a comma-separated list, dropping blanks.
/// Falls back to `default` when the variable is unset.
fn parse_env_list(var: &str, default: &[&str]) -> Vec<String> {
    match env::var(var) {
        Ok(val) => val
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect(),
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}

/// One week, in seconds.
pub const DEFAULT_MAX_DOCUMENT_TIMEOUT: f64 = 604_800.0;

pub const DEFAULT_OCR_ENGINE: &str = "easyocr";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub conversion: ConversionConfig,
    pub ocr: OcrEngineConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Server-wide policy applied to every conversion request.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    /// Upper bound (inclusive) for `document_timeout`, in seconds.
    pub max_document_timeout: f64,
    /// When false, only first-party OCR engines are offered.
    pub allow_external_plugins: bool,
}

/// OCR engine plugins known to this process.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrEngineConfig {
    pub engines: Vec<String>,
    pub external_engines: Vec<String>,
    pub default_engine: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_document_timeout: DEFAULT_MAX_DOCUMENT_TIMEOUT,
            allow_external_plugins: false,
        }
    }
}

impl Default for OcrEngineConfig {
    fn default() -> Self {
        Self {
            engines: FIRST_PARTY_ENGINES.iter().map(|s| s.to_string()).collect(),
            external_engines: Vec::new(),
            default_engine: DEFAULT_OCR_ENGINE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("DOCSERVE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("DOCSERVE_PORT", 5001),
            },
            conversion: ConversionConfig {
                max_document_timeout: parse_env_or(
                    "DOCSERVE_MAX_DOCUMENT_TIMEOUT",
                    DEFAULT_MAX_DOCUMENT_TIMEOUT,
                ),
                allow_external_plugins: parse_env_or("DOCSERVE_ALLOW_EXTERNAL_PLUGINS", false),
            },
            ocr: OcrEngineConfig {
                engines: parse_env_list("DOCSERVE_OCR_ENGINES", FIRST_PARTY_ENGINES),
                external_engines: parse_env_list("DOCSERVE_OCR_EXTERNAL_ENGINES", &[]),
                default_engine: env::var("DOCSERVE_OCR_DEFAULT_ENGINE")
                    .unwrap_or_else(|_| DEFAULT_OCR_ENGINE.to_string()),
            },
            logging: LoggingConfig::from_env(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            format: parse_env_or("DOCSERVE_LOG_FORMAT", LogFormat::Pretty),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "DOCSERVE_HOST",
            "DOCSERVE_PORT",
            "DOCSERVE_MAX_DOCUMENT_TIMEOUT",
            "DOCSERVE_ALLOW_EXTERNAL_PLUGINS",
            "DOCSERVE_OCR_ENGINES",
            "DOCSERVE_OCR_EXTERNAL_ENGINES",
            "DOCSERVE_OCR_DEFAULT_ENGINE",
            "DOCSERVE_LOG_FORMAT",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();

        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5001);
        assert_eq!(
            config.conversion.max_document_timeout,
            DEFAULT_MAX_DOCUMENT_TIMEOUT
        );
        assert!(!config.conversion.allow_external_plugins);
        assert_eq!(config.ocr.default_engine, "easyocr");
        assert_eq!(config.ocr.engines.len(), FIRST_PARTY_ENGINES.len());
        assert!(config.ocr.external_engines.is_empty());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        clear_env();
        std::env::set_var("DOCSERVE_MAX_DOCUMENT_TIMEOUT", "600");
        std::env::set_var("DOCSERVE_ALLOW_EXTERNAL_PLUGINS", "true");
        std::env::set_var("DOCSERVE_OCR_ENGINES", "easyocr, tesseract,,");
        std::env::set_var("DOCSERVE_OCR_EXTERNAL_ENGINES", "surya");
        std::env::set_var("DOCSERVE_LOG_FORMAT", "json");

        let config = Config::from_env();
        assert_eq!(config.conversion.max_document_timeout, 600.0);
        assert!(config.conversion.allow_external_plugins);
        assert_eq!(config.ocr.engines, vec!["easyocr", "tesseract"]);
        assert_eq!(config.ocr.external_engines, vec!["surya"]);
        assert_eq!(config.logging.format, LogFormat::Json);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_falls_back_to_default() {
        clear_env();
        std::env::set_var("DOCSERVE_MAX_DOCUMENT_TIMEOUT", "forever");

        let config = Config::default();
        assert_eq!(
            config.conversion.max_document_timeout,
            DEFAULT_MAX_DOCUMENT_TIMEOUT
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_parse_env_or_valid_value() {
        std::env::set_var("__TEST_PARSE_PORT", "8080");
        let result: u16 = parse_env_or("__TEST_PARSE_PORT", 3000);
        assert_eq!(result, 8080);
        std::env::remove_var("__TEST_PARSE_PORT");
    }
}
