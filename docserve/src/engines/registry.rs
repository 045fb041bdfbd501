use crate::config::OcrEngineConfig;

use super::EngineKey;

/// Where an engine plugin comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOrigin {
    FirstParty,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePlugin {
    pub kind: EngineKey,
    pub origin: EngineOrigin,
}

impl EnginePlugin {
    pub fn first_party(kind: impl Into<EngineKey>) -> Self {
        Self {
            kind: kind.into(),
            origin: EngineOrigin::FirstParty,
        }
    }

    pub fn external(kind: impl Into<EngineKey>) -> Self {
        Self {
            kind: kind.into(),
            origin: EngineOrigin::External,
        }
    }
}

/// Enumerates installed OCR engine plugins.
pub trait EngineRegistry: Send + Sync {
    /// Installed engine kinds in registration order. External plugins are
    /// left out unless `allow_external` is set.
    fn enumerate(&self, allow_external: bool) -> Vec<EngineKey>;

    /// Engine used when a request does not name one.
    fn default_key(&self) -> EngineKey;
}

/// Registry over a fixed list of plugins.
#[derive(Debug, Clone)]
pub struct StaticEngineRegistry {
    plugins: Vec<EnginePlugin>,
    default_key: EngineKey,
}

impl StaticEngineRegistry {
    pub fn new(plugins: Vec<EnginePlugin>, default_key: impl Into<EngineKey>) -> Self {
        Self {
            plugins,
            default_key: default_key.into(),
        }
    }

    pub fn from_config(config: &OcrEngineConfig) -> Self {
        let plugins = config
            .engines
            .iter()
            .map(EnginePlugin::first_party)
            .chain(config.external_engines.iter().map(EnginePlugin::external))
            .collect();
        Self::new(plugins, config.default_engine.clone())
    }

    pub fn plugins(&self) -> &[EnginePlugin] {
        &self.plugins
    }
}

impl EngineRegistry for StaticEngineRegistry {
    fn enumerate(&self, allow_external: bool) -> Vec<EngineKey> {
        self.plugins
            .iter()
            .filter(|plugin| allow_external || plugin.origin == EngineOrigin::FirstParty)
            .map(|plugin| plugin.kind.clone())
            .collect()
    }

    fn default_key(&self) -> EngineKey {
        self.default_key.clone()
    }
}
