//! Strata Identifiers
//!
//! Opaque identifiers shared by every crate of the layer model.
//!
//! # Overview
//!
//! - **Entity ids** ([`LayerId`], [`SceneId`], [`PropertyId`], ...): ULID newtypes
//! - **Plugin ids** ([`PluginId`], [`PluginExtensionId`]): validated names
//! - **Schema ids** ([`PropertySchemaId`]): derived from a plugin/extension pair
//!
//! # Example
//!
//! ```rust
//! use strata_id::{LayerId, PluginExtensionId, PluginId, PropertySchemaId};
//!
//! let layer = LayerId::new();
//! assert_eq!(layer, layer.to_string().parse().unwrap());
//!
//! let plugin: PluginId = "marker~1.0.0".parse().unwrap();
//! let ext = PluginExtensionId::new("pin").unwrap();
//! let schema = PropertySchemaId::from_extension(&plugin, &ext);
//! assert_eq!(schema.to_string(), "marker~1.0.0/pin");
//! ```

#![warn(missing_docs)]

mod plugin;
mod ulid_id;

pub use plugin::{PluginExtensionId, PluginId, PropertySchemaId};
pub use ulid_id::{
    DatasetId, DatasetSchemaId, InfoboxFieldId, LayerId, PropertyId, SceneId, TagId,
};

/// Identifier parse/validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// String is not a valid ULID
    #[error("invalid {kind} id: {value}")]
    InvalidUlid {
        /// Kind of id being parsed
        kind: &'static str,
        /// Offending input
        value: String,
    },

    /// Malformed plugin id
    #[error("invalid plugin id: {0}")]
    InvalidPlugin(String),

    /// Malformed extension id
    #[error("invalid plugin extension id: {0}")]
    InvalidExtension(String),

    /// Malformed property schema id
    #[error("invalid property schema id: {0}")]
    InvalidSchema(String),
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
