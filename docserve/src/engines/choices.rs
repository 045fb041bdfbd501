use std::sync::Arc;

use crate::error::ConfigurationError;

use super::{EngineKey, EngineRegistry};

/// The closed set of OCR engine keys a request may select.
///
/// Built once from an [`EngineRegistry`] before any request is served and
/// never modified afterwards. Cloning is cheap; clones share the same keys.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineChoices {
    keys: Arc<[EngineKey]>,
    default_key: EngineKey,
}

impl EngineChoices {
    /// Freeze the registry's enumeration into a legal key set.
    ///
    /// Fails when the registry yields no engines, or when its default engine
    /// is not among them. Duplicate kinds keep their first position.
    pub fn from_registry(
        registry: &dyn EngineRegistry,
        allow_external: bool,
    ) -> Result<Self, ConfigurationError> {
        let mut keys: Vec<EngineKey> = Vec::new();
        for key in registry.enumerate(allow_external) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        if keys.is_empty() {
            return Err(ConfigurationError::NoEngines { allow_external });
        }

        let default_key = registry.default_key();
        if !keys.contains(&default_key) {
            return Err(ConfigurationError::DefaultEngineUnavailable {
                default: default_key,
                available: keys,
            });
        }

        tracing::debug!(
            engines = %keys.join(", "),
            default = %default_key,
            allow_external,
            "Resolved OCR engine choices"
        );

        Ok(Self {
            keys: keys.into(),
            default_key,
        })
    }

    pub fn keys(&self) -> &[EngineKey] {
        &self.keys
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Look up `value` in the legal set, returning the stored key.
    pub fn resolve(&self, value: &str) -> Option<&EngineKey> {
        self.keys.iter().find(|k| k.as_str() == value)
    }

    /// Human-readable description for API documentation.
    pub fn description(&self) -> String {
        format!(
            "The OCR engine to use. String. Allowed values: {}. Optional, defaults to {}.",
            self.keys.join(", "),
            self.default_key
        )
    }
}
