//! Strata Plugin Descriptors
//!
//! A [`Plugin`] bundles a set of [`Extension`]s. Each extension declares what
//! kind of thing it renders and which property schema backs its settings.
//! The layer model only needs two answers from a plugin: "does this extension
//! exist" and "which schema does it use", both answered without I/O.

#![warn(missing_docs)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strata_id::{PluginExtensionId, PluginId, PropertySchemaId};

/// What an extension renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionKind {
    /// Primitive drawn on the map (marker, polygon, model, ...)
    Primitive,
    /// Overlay widget
    Widget,
    /// Infobox block
    Block,
    /// Scene visualizer
    Visualizer,
    /// Infobox container
    Infobox,
}

/// A single plugin extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    id: PluginExtensionId,
    kind: ExtensionKind,
    schema: PropertySchemaId,
}

impl Extension {
    /// Create an extension with an explicit schema
    #[inline]
    #[must_use]
    pub fn new(id: PluginExtensionId, kind: ExtensionKind, schema: PropertySchemaId) -> Self {
        Self { id, kind, schema }
    }

    /// Extension id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &PluginExtensionId {
        &self.id
    }

    /// Extension kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ExtensionKind {
        self.kind
    }

    /// Property schema backing this extension
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &PropertySchemaId {
        &self.schema
    }
}

/// Plugin descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    id: PluginId,
    name: String,
    extensions: IndexMap<PluginExtensionId, Extension>,
}

impl Plugin {
    /// Create an empty plugin
    #[inline]
    #[must_use]
    pub fn new(id: PluginId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extensions: IndexMap::new(),
        }
    }

    /// Add an extension whose schema is derived from `(plugin, extension)`
    #[must_use]
    pub fn with_extension(mut self, id: PluginExtensionId, kind: ExtensionKind) -> Self {
        let schema = PropertySchemaId::from_extension(&self.id, &id);
        self.extensions
            .insert(id.clone(), Extension::new(id, kind, schema));
        self
    }

    /// Plugin id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &PluginId {
        &self.id
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extensions in declaration order
    pub fn extensions(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.values()
    }

    /// Lookup an extension
    #[inline]
    #[must_use]
    pub fn extension(&self, id: &PluginExtensionId) -> Option<&Extension> {
        self.extensions.get(id)
    }

    /// Schema of the property used by `extension`
    ///
    /// # Errors
    /// Returns [`PluginError::ExtensionNotFound`] if the plugin does not
    /// declare the extension.
    pub fn property_schema(&self, extension: &PluginExtensionId) -> Result<&PropertySchemaId, PluginError> {
        self.extension(extension)
            .map(Extension::schema)
            .ok_or_else(|| PluginError::ExtensionNotFound {
                plugin: self.id.clone(),
                extension: extension.clone(),
            })
    }
}

/// Plugin capability errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
    /// Extension is not declared by the plugin
    #[error("extension {extension} not found in plugin {plugin}")]
    ExtensionNotFound {
        /// Plugin that was searched
        plugin: PluginId,
        /// Missing extension
        extension: PluginExtensionId,
    },
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_plugin() -> Plugin {
        Plugin::new("marker~1.0.0".parse().unwrap(), "Marker")
            .with_extension(PluginExtensionId::new("pin").unwrap(), ExtensionKind::Primitive)
            .with_extension(PluginExtensionId::new("card").unwrap(), ExtensionKind::Block)
    }

    #[test]
    fn resolves_schema_for_known_extension() {
        let plugin = marker_plugin();
        let ext = PluginExtensionId::new("pin").unwrap();

        let schema = plugin.property_schema(&ext).unwrap();
        assert_eq!(schema, &PropertySchemaId::from_extension(plugin.id(), &ext));
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let plugin = marker_plugin();
        let ext = PluginExtensionId::new("missing").unwrap();

        assert!(matches!(
            plugin.property_schema(&ext),
            Err(PluginError::ExtensionNotFound { .. })
        ));
    }

    #[test]
    fn extensions_keep_declaration_order() {
        let plugin = marker_plugin();
        let ids: Vec<_> = plugin.extensions().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["pin", "card"]);
        assert_eq!(plugin.name(), "Marker");
    }

    #[test]
    fn extension_kind_serde() {
        let json = serde_json::to_string(&ExtensionKind::Primitive).unwrap();
        assert_eq!(json, "\"primitive\"");
    }
}
