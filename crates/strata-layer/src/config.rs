//! Layer model configuration

use crate::LayerError;
use serde::{Deserialize, Serialize};
use strata_id::PropertySchemaId;
use strata_property::builtin;

/// Default recursion limit for initialization and tree walks
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunables shared by the initializer, the tree walk and the merger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct LayerConfig {
    /// Schema the infobox's own property is created against
    pub infobox_schema: PropertySchemaId,
    /// Maximum nesting depth of a layer tree
    pub max_depth: usize,
}

impl LayerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a custom infobox schema
    #[inline]
    #[must_use]
    pub fn with_infobox_schema(mut self, schema: PropertySchemaId) -> Self {
        self.infobox_schema = schema;
        self
    }

    /// With a custom depth limit
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse configuration from TOML; missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`LayerError::Config`] on malformed input.
    pub fn from_toml_str(s: &str) -> Result<Self, LayerError> {
        Ok(toml::from_str(s)?)
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            infobox_schema: builtin::infobox_schema(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
