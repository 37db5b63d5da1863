//! Strata Property Capability
//!
//! The slice of the property subsystem the layer model consumes.
//!
//! # Core Concepts
//!
//! - [`Property`]: schema-tagged value bag owned by a scene
//! - [`PropertyMap`]: id-indexed catalog used for validation
//! - [`PropertyInitializer`]: declarative defaults from plugin manifests
//! - [`MergedMetadata`]: original/parent/dataset descriptor of a merged view
//!
//! # Example
//!
//! ```rust
//! use strata_id::SceneId;
//! use strata_property::{builtin, PropertyInitializer, PropertyMap};
//!
//! let schema = builtin::infobox_schema();
//! let p = PropertyInitializer::property_including_empty(None, SceneId::new(), &schema).unwrap();
//!
//! let mut catalog = PropertyMap::new();
//! catalog.add(p.clone());
//! assert_eq!(catalog.get(&p.id()).unwrap().schema(), &schema);
//! ```

#![warn(missing_docs)]

mod initializer;
mod map;
mod merged;
mod property;

pub use initializer::PropertyInitializer;
pub use map::PropertyMap;
pub use merged::MergedMetadata;
pub use property::{Property, PropertyBuilder};

use strata_id::PropertySchemaId;

/// Built-in schemas provided by the host rather than a third-party plugin
pub mod builtin {
    use once_cell::sync::Lazy;
    use strata_id::{PluginId, PropertySchemaId};

    /// Name of the built-in plugin
    pub const PLUGIN_NAME: &str = "strata";

    /// Schema name of the infobox property
    pub const INFOBOX_SCHEMA_NAME: &str = "infobox";

    static INFOBOX_SCHEMA: Lazy<PropertySchemaId> = Lazy::new(|| {
        let plugin = PluginId::new(PLUGIN_NAME, None).expect("built-in plugin id is valid");
        PropertySchemaId::new(plugin, INFOBOX_SCHEMA_NAME).expect("built-in schema id is valid")
    });

    /// Schema every infobox's own property conforms to
    #[must_use]
    pub fn infobox_schema() -> PropertySchemaId {
        INFOBOX_SCHEMA.clone()
    }
}

/// Property capability errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// Missing id on build
    #[error("invalid property id")]
    InvalidId,

    /// Missing scene on build
    #[error("property has no scene")]
    MissingScene,

    /// Missing schema on build
    #[error("property has no schema")]
    MissingSchema,

    /// Initializer schema disagrees with the derived schema
    #[error("property schema mismatch: expected {expected}, got {actual}")]
    SchemaMismatch {
        /// Schema the caller derived
        expected: PropertySchemaId,
        /// Schema the initializer declared
        actual: PropertySchemaId,
    },
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
