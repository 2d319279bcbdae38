//! Generation options.

use serde::{Deserialize, Serialize};

use crate::ident::Casing;

pub const DEFAULT_NAMESPACE: &str = r"App\Data";
pub const DEFAULT_ROOT_NAME: &str = "Root";

/// Options for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Namespace every generated class lives in.
    pub namespace: String,
    /// Source name for the root shape's class (before suffixing).
    pub root_name: String,
    /// Casing transform for field identifiers.
    pub casing: Casing,
    /// Synthesize getter descriptors.
    pub getters: bool,
    /// Synthesize setter descriptors.
    pub setters: bool,
    /// Classify `YYYY-MM-DD`-prefixed strings as dates.
    pub detect_dates: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            root_name: DEFAULT_ROOT_NAME.to_string(),
            casing: Casing::None,
            getters: false,
            setters: false,
            detect_dates: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.config.root_name = name.into();
        self
    }

    pub fn casing(mut self, casing: Casing) -> Self {
        self.config.casing = casing;
        self
    }

    pub fn getters(mut self, getters: bool) -> Self {
        self.config.getters = getters;
        self
    }

    pub fn setters(mut self, setters: bool) -> Self {
        self.config.setters = setters;
        self
    }

    pub fn detect_dates(mut self, detect: bool) -> Self {
        self.config.detect_dates = detect;
        self
    }

    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
