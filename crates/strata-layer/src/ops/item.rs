//! Item creation from a plugin extension

use crate::{Item, LayerCommon, LayerError};
use strata_id::{DatasetId, PluginExtensionId, SceneId};
use strata_plugin::{ExtensionKind, Plugin};
use strata_property::Property;
use tracing::debug;

/// Request to create a single item, optionally rendered by a plugin
#[derive(Debug, Clone)]
pub struct LayerItem<'a> {
    /// Owning scene
    pub scene: SceneId,
    /// Plugin providing the extension
    pub plugin: Option<&'a Plugin>,
    /// Extension rendering the item
    pub extension: Option<PluginExtensionId>,
    /// Dataset to link
    pub linked_dataset: Option<DatasetId>,
    /// Display name
    pub name: String,
}

impl<'a> LayerItem<'a> {
    /// Request for a plain item in `scene`
    #[must_use]
    pub fn new(scene: SceneId) -> Self {
        Self {
            scene,
            plugin: None,
            extension: None,
            linked_dataset: None,
            name: String::new(),
        }
    }

    /// Render with `extension` of `plugin`
    #[must_use]
    pub fn with_extension(mut self, plugin: &'a Plugin, extension: PluginExtensionId) -> Self {
        self.plugin = Some(plugin);
        self.extension = Some(extension);
        self
    }

    /// Link a dataset
    #[must_use]
    pub fn with_linked_dataset(mut self, dataset: DatasetId) -> Self {
        self.linked_dataset = Some(dataset);
        self
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create the item, plus its property when rendered by a plugin
    ///
    /// # Errors
    /// [`LayerError::Plugin`] if the plugin lacks the extension,
    /// [`LayerError::ExtensionTypeMustBePrimitive`] if the extension is
    /// not a primitive.
    pub fn initialize(&self) -> Result<(Item, Option<Property>), LayerError> {
        let mut builder = Item::builder()
            .new_id()
            .scene(self.scene)
            .name(self.name.clone())
            .linked_dataset(self.linked_dataset);

        let mut property = None;
        if let (Some(plugin), Some(extension_id)) = (self.plugin, &self.extension) {
            let schema = plugin.property_schema(extension_id)?;
            let is_primitive = plugin
                .extension(extension_id)
                .is_some_and(|e| e.kind() == ExtensionKind::Primitive);
            if !is_primitive {
                return Err(LayerError::ExtensionTypeMustBePrimitive);
            }

            let p = Property::builder()
                .new_id()
                .scene(self.scene)
                .schema(schema.clone())
                .build()?;
            builder = builder
                .plugin(Some(plugin.id().clone()))
                .extension(Some(extension_id.clone()))
                .property(Some(p.id()));
            property = Some(p);
        }

        let item = builder.build()?;
        debug!(layer = %item.id(), scene = %self.scene, "created item layer");
        Ok((item, property))
    }
}
