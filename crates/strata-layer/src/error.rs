//! Error types for the layer model
//!
//! Errors fall into four groups:
//! - Construction errors (missing ids on build)
//! - Validation errors (property/schema mismatches against a catalog)
//! - Domain-rule errors (tag attach/detach)
//! - Propagation errors (initializer failures wrapped with their position)

use strata_id::{InfoboxFieldId, LayerId, PropertyId, PropertySchemaId, TagId};
use strata_plugin::PluginError;
use strata_property::PropertyError;

/// Main layer error type
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    /// Builder was given no id
    #[error("invalid layer id")]
    InvalidId,

    /// Builder was given no scene
    #[error("layer has no scene")]
    MissingScene,

    /// Infobox field builder is missing a mandatory part
    #[error("invalid infobox field: missing {0}")]
    InvalidInfoboxField(&'static str),

    /// Group would contain itself
    #[error("group {0} cannot contain itself")]
    SelfReference(LayerId),

    /// Tag already attached
    #[error("tag {0} is already attached")]
    DuplicateTag(TagId),

    /// Tag not attached
    #[error("tag {0} is not attached")]
    TagNotFound(TagId),

    /// Property validation failed
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Loader failure
    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    /// Tree deeper than the configured limit
    #[error("layer tree depth exceeded (max: {0})")]
    DepthExceeded(usize),

    /// Items can only be created from primitive extensions
    #[error("extension type must be primitive")]
    ExtensionTypeMustBePrimitive,

    /// Plugin capability error
    #[error("plugin error: {0}")]
    Plugin(#[from] PluginError),

    /// Property capability error
    #[error("property error: {0}")]
    Property(#[from] PropertyError),

    /// Configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Property validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Referenced property is not in the catalog
    #[error("property {0} does not exist")]
    PropertyNotFound(PropertyId),

    /// Property schema differs from the plugin-derived schema
    #[error("property {property} has an invalid schema: expected {expected}, got {actual}")]
    InvalidSchema {
        /// Offending property
        property: PropertyId,
        /// Schema derived from plugin and extension
        expected: PropertySchemaId,
        /// Schema the property actually has
        actual: PropertySchemaId,
    },

    /// Layer has a property but no plugin/extension pair
    #[error("layer should have plugin id and extension id")]
    MissingPluginBinding,

    /// Layer has a plugin/extension (or half of one) but no property
    #[error("layer should have property id")]
    MissingProperty,

    /// Error inside the layer's infobox
    #[error("infobox: {0}")]
    Infobox(#[source] Box<ValidationError>),

    /// Error on a specific infobox field
    #[error("field[{index}]({id}): {source}")]
    Field {
        /// Position of the field
        index: usize,
        /// Field id
        id: InfoboxFieldId,
        /// Underlying error
        source: Box<ValidationError>,
    },
}

/// Errors produced while materializing a layer tree
#[derive(Debug, thiserror::Error)]
pub enum InitializerError {
    /// Failure in a nested child layer
    #[error("layer[{index}]: {source}")]
    Child {
        /// Position among the parent's children
        index: usize,
        /// Underlying error
        source: Box<InitializerError>,
    },

    /// Failure while building the infobox
    #[error("infobox: {0}")]
    Infobox(#[source] Box<InitializerError>),

    /// Failure on a specific infobox field
    #[error("field[{index}]: {source}")]
    InfoboxField {
        /// Position of the field
        index: usize,
        /// Underlying error
        source: Box<InitializerError>,
    },

    /// Property could not be created
    #[error("property: {0}")]
    Property(#[from] PropertyError),

    /// A property initializer was given to a layer without plugin binding
    #[error("property initializer requires plugin and extension")]
    PropertyWithoutPlugin,

    /// Layer could not be built
    #[error("layer: {0}")]
    Layer(#[source] Box<LayerError>),

    /// Initializer nested deeper than the configured limit
    #[error("initializer depth exceeded (max: {0})")]
    DepthExceeded(usize),
}

impl From<LayerError> for InitializerError {
    fn from(err: LayerError) -> Self {
        Self::Layer(Box::new(err))
    }
}

/// Loader failures
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Storage or transport backend failed
    #[error("backend error: {0}")]
    Backend(#[from] anyhow::Error),
}
