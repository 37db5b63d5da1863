//! Layer builders
//!
//! Layers are only created through builders. [`LayerBuilder`] collects the
//! shared state and is then specialized with [`group`](LayerBuilder::group)
//! or [`item`](LayerBuilder::item). Building fails without an id or scene.
//!
//! ```rust
//! use strata_id::SceneId;
//! use strata_layer::{Layer, LayerCommon};
//!
//! let group = Layer::builder()
//!     .new_id()
//!     .scene(SceneId::new())
//!     .name("folder")
//!     .group()
//!     .build()
//!     .unwrap();
//! assert_eq!(group.name(), "folder");
//! assert!(group.is_visible());
//! ```

use crate::{GroupBuilder, Infobox, ItemBuilder, LayerBase, LayerError, TagList};
use strata_id::{LayerId, PluginExtensionId, PluginId, PropertyId, SceneId};

/// Builder for the state shared by groups and items
#[derive(Debug, Clone)]
pub struct LayerBuilder {
    id: Option<LayerId>,
    scene: Option<SceneId>,
    name: String,
    visible: bool,
    plugin: Option<PluginId>,
    extension: Option<PluginExtensionId>,
    property: Option<PropertyId>,
    infobox: Option<Infobox>,
    tags: TagList,
}

impl Default for LayerBuilder {
    fn default() -> Self {
        Self {
            id: None,
            scene: None,
            name: String::new(),
            visible: true,
            plugin: None,
            extension: None,
            property: None,
            infobox: None,
            tags: TagList::default(),
        }
    }
}

impl LayerBuilder {
    /// Create a builder; layers are visible by default
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Specialize into a group builder
    #[inline]
    #[must_use]
    pub fn group(self) -> GroupBuilder {
        GroupBuilder::from_base(self)
    }

    /// Specialize into an item builder
    #[inline]
    #[must_use]
    pub fn item(self) -> ItemBuilder {
        ItemBuilder::from_base(self)
    }

    /// Explicit id
    #[inline]
    #[must_use]
    pub fn id(mut self, id: LayerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Generate an id
    #[inline]
    #[must_use]
    pub fn new_id(mut self) -> Self {
        self.id = Some(LayerId::new());
        self
    }

    /// Owning scene
    #[inline]
    #[must_use]
    pub fn scene(mut self, scene: SceneId) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Visibility
    #[inline]
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Visibility, keeping the default when `None`
    #[inline]
    #[must_use]
    pub fn visible_opt(mut self, visible: Option<bool>) -> Self {
        if let Some(v) = visible {
            self.visible = v;
        }
        self
    }

    /// Bound plugin
    #[inline]
    #[must_use]
    pub fn plugin(mut self, plugin: Option<PluginId>) -> Self {
        self.plugin = plugin;
        self
    }

    /// Bound extension
    #[inline]
    #[must_use]
    pub fn extension(mut self, extension: Option<PluginExtensionId>) -> Self {
        self.extension = extension;
        self
    }

    /// Own property
    #[inline]
    #[must_use]
    pub fn property(mut self, property: Option<PropertyId>) -> Self {
        self.property = property;
        self
    }

    /// Infobox
    #[inline]
    #[must_use]
    pub fn infobox(mut self, infobox: Option<Infobox>) -> Self {
        self.infobox = infobox;
        self
    }

    /// Tags
    #[inline]
    #[must_use]
    pub fn tags(mut self, tags: TagList) -> Self {
        self.tags = tags;
        self
    }

    pub(crate) fn build_base(self) -> Result<LayerBase, LayerError> {
        Ok(LayerBase {
            id: self.id.ok_or(LayerError::InvalidId)?,
            scene: self.scene.ok_or(LayerError::MissingScene)?,
            name: self.name,
            visible: self.visible,
            plugin: self.plugin,
            extension: self.extension,
            property: self.property,
            infobox: self.infobox,
            tags: self.tags,
        })
    }
}

/// Forward the shared setters of [`LayerBuilder`] from a variant builder
macro_rules! forward_base_setters {
    () => {
        /// Explicit id
        #[inline]
        #[must_use]
        pub fn id(mut self, id: strata_id::LayerId) -> Self {
            self.base = self.base.id(id);
            self
        }

        /// Generate an id
        #[inline]
        #[must_use]
        pub fn new_id(mut self) -> Self {
            self.base = self.base.new_id();
            self
        }

        /// Owning scene
        #[inline]
        #[must_use]
        pub fn scene(mut self, scene: strata_id::SceneId) -> Self {
            self.base = self.base.scene(scene);
            self
        }

        /// Display name
        #[inline]
        #[must_use]
        pub fn name(mut self, name: impl Into<String>) -> Self {
            self.base = self.base.name(name);
            self
        }

        /// Visibility
        #[inline]
        #[must_use]
        pub fn visible(mut self, visible: bool) -> Self {
            self.base = self.base.visible(visible);
            self
        }

        /// Bound plugin
        #[inline]
        #[must_use]
        pub fn plugin(mut self, plugin: Option<strata_id::PluginId>) -> Self {
            self.base = self.base.plugin(plugin);
            self
        }

        /// Bound extension
        #[inline]
        #[must_use]
        pub fn extension(mut self, extension: Option<strata_id::PluginExtensionId>) -> Self {
            self.base = self.base.extension(extension);
            self
        }

        /// Own property
        #[inline]
        #[must_use]
        pub fn property(mut self, property: Option<strata_id::PropertyId>) -> Self {
            self.base = self.base.property(property);
            self
        }

        /// Infobox
        #[inline]
        #[must_use]
        pub fn infobox(mut self, infobox: Option<crate::Infobox>) -> Self {
            self.base = self.base.infobox(infobox);
            self
        }

        /// Tags
        #[inline]
        #[must_use]
        pub fn tags(mut self, tags: crate::TagList) -> Self {
            self.base = self.base.tags(tags);
            self
        }
    };
}

pub(crate) use forward_base_setters;
