//! State shared by every layer variant
//!
//! [`LayerBase`] is embedded by both [`Group`](crate::Group) and
//! [`Item`](crate::Item). The [`LayerCommon`] trait exposes it uniformly so
//! the same accessors and setters work on a `Group`, an `Item`, or a
//! [`Layer`](crate::Layer) without matching on the variant.

use crate::{Infobox, LayerError, TagList, ValidationError};
use strata_id::{LayerId, PluginExtensionId, PluginId, PropertyId, PropertySchemaId, SceneId, TagId};
use strata_property::PropertyMap;

/// Fields common to groups and items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerBase {
    pub(crate) id: LayerId,
    pub(crate) scene: SceneId,
    pub(crate) name: String,
    pub(crate) visible: bool,
    pub(crate) plugin: Option<PluginId>,
    pub(crate) extension: Option<PluginExtensionId>,
    pub(crate) property: Option<PropertyId>,
    pub(crate) infobox: Option<Infobox>,
    pub(crate) tags: TagList,
}

impl LayerBase {
    /// Property ids owned by this layer: own property, infobox property,
    /// then each infobox field's property
    #[must_use]
    pub fn properties(&self) -> Vec<PropertyId> {
        let mut ids = Vec::new();
        ids.extend(self.property);
        if let Some(infobox) = &self.infobox {
            ids.push(infobox.property());
            ids.extend(infobox.fields().iter().map(|f| f.property()));
        }
        ids
    }

    /// Validate the layer property and infobox against `catalog`
    ///
    /// # Errors
    /// The first [`ValidationError`]; infobox errors are wrapped in
    /// [`ValidationError::Infobox`].
    pub fn validate_properties(&self, catalog: &PropertyMap) -> Result<(), ValidationError> {
        match (&self.property, &self.plugin, &self.extension) {
            (Some(property), Some(plugin), Some(extension)) => {
                let expected = PropertySchemaId::from_extension(plugin, extension);
                let found = catalog
                    .get(property)
                    .ok_or(ValidationError::PropertyNotFound(*property))?;
                if found.schema() != &expected {
                    return Err(ValidationError::InvalidSchema {
                        property: *property,
                        expected,
                        actual: found.schema().clone(),
                    });
                }
            }
            (Some(_), _, _) => return Err(ValidationError::MissingPluginBinding),
            (None, None, None) => {}
            (None, _, _) => return Err(ValidationError::MissingProperty),
        }

        if let Some(infobox) = &self.infobox {
            infobox
                .validate_properties(catalog)
                .map_err(|e| ValidationError::Infobox(Box::new(e)))?;
        }
        Ok(())
    }
}

/// Accessors and setters shared by every layer variant
pub trait LayerCommon {
    /// Shared state
    fn base(&self) -> &LayerBase;

    /// Mutable shared state
    fn base_mut(&mut self) -> &mut LayerBase;

    /// Layer id
    fn id(&self) -> LayerId {
        self.base().id
    }

    /// Owning scene
    fn scene(&self) -> SceneId {
        self.base().scene
    }

    /// Display name
    fn name(&self) -> &str {
        &self.base().name
    }

    /// Visibility flag
    fn is_visible(&self) -> bool {
        self.base().visible
    }

    /// Bound plugin
    fn plugin(&self) -> Option<&PluginId> {
        self.base().plugin.as_ref()
    }

    /// Bound extension
    fn extension(&self) -> Option<&PluginExtensionId> {
        self.base().extension.as_ref()
    }

    /// Whether both plugin and extension are set
    fn uses_plugin(&self) -> bool {
        self.base().plugin.is_some() && self.base().extension.is_some()
    }

    /// Own property
    fn property(&self) -> Option<PropertyId> {
        self.base().property
    }

    /// Infobox
    fn infobox(&self) -> Option<&Infobox> {
        self.base().infobox.as_ref()
    }

    /// Mutable infobox
    fn infobox_mut(&mut self) -> Option<&mut Infobox> {
        self.base_mut().infobox.as_mut()
    }

    /// Whether an infobox is attached
    fn has_infobox(&self) -> bool {
        self.base().infobox.is_some()
    }

    /// Attached tags
    fn tags(&self) -> &TagList {
        &self.base().tags
    }

    /// Rename
    fn rename(&mut self, name: impl Into<String>)
    where
        Self: Sized,
    {
        self.base_mut().name = name.into();
    }

    /// Show or hide
    fn set_visible(&mut self, visible: bool) {
        self.base_mut().visible = visible;
    }

    /// Replace the infobox
    fn set_infobox(&mut self, infobox: Option<Infobox>) {
        self.base_mut().infobox = infobox;
    }

    /// Replace the plugin, keeping the extension
    fn set_plugin(&mut self, plugin: Option<PluginId>) {
        self.base_mut().plugin = plugin;
    }

    /// Attach a tag
    ///
    /// # Errors
    /// [`LayerError::DuplicateTag`] if already attached.
    fn attach_tag(&mut self, tag: TagId) -> Result<(), LayerError> {
        if self.base_mut().tags.add(tag) {
            Ok(())
        } else {
            Err(LayerError::DuplicateTag(tag))
        }
    }

    /// Detach a tag
    ///
    /// # Errors
    /// [`LayerError::TagNotFound`] if not attached.
    fn detach_tag(&mut self, tag: TagId) -> Result<(), LayerError> {
        if self.base_mut().tags.remove(&tag) {
            Ok(())
        } else {
            Err(LayerError::TagNotFound(tag))
        }
    }

    /// Strip infobox fields rendered by `plugin`; empty if there is no infobox
    fn remove_infobox_fields_by_plugin(&mut self, plugin: &PluginId) -> Vec<PropertyId> {
        self.infobox_mut()
            .map(|ib| ib.remove_all_by_plugin(plugin, None))
            .unwrap_or_default()
    }

    /// See [`LayerBase::properties`]
    fn properties(&self) -> Vec<PropertyId> {
        self.base().properties()
    }

    /// See [`LayerBase::validate_properties`]
    ///
    /// # Errors
    /// The first validation failure.
    fn validate_properties(&self, catalog: &PropertyMap) -> Result<(), ValidationError> {
        self.base().validate_properties(catalog)
    }
}
