//! Declarative layer-tree materialization
//!
//! An [`Initializer`] describes a layer, its infobox and, for groups, its
//! children. [`Initializer::layer`] turns the description into concrete
//! layers plus every property object they need. Nested children are
//! materialized depth-first and failures are reported with the path of
//! the offending node, e.g. `layer[1]: infobox: field[0]: ...`.
//!
//! Initializers deserialize from camelCase JSON:
//!
//! ```rust
//! use strata_id::SceneId;
//! use strata_layer::Initializer;
//!
//! let init: Initializer = serde_json::from_str(
//!     r#"{ "name": "root", "layers": [{ "name": "child" }] }"#,
//! ).unwrap();
//!
//! let result = init.layer(SceneId::new()).unwrap();
//! assert_eq!(result.layers.len(), 2);
//! assert!(result.root_group().is_some());
//! ```

use crate::{Group, IdList, Infobox, InfoboxField, InitializerError, Item, Layer, LayerBuilder, LayerConfig, Map};
use serde::{Deserialize, Serialize};
use strata_id::{
    DatasetId, DatasetSchemaId, InfoboxFieldId, LayerId, PluginExtensionId, PluginId, PropertyId, PropertySchemaId,
    SceneId,
};
use strata_property::{Property, PropertyInitializer, PropertyMap};
use tracing::debug;

/// Declarative description of a layer subtree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Initializer {
    /// Explicit id; generated when absent
    pub id: Option<LayerId>,
    /// Bound plugin
    pub plugin: Option<PluginId>,
    /// Bound extension
    pub extension: Option<PluginExtensionId>,
    /// Display name
    pub name: String,
    /// Infobox description
    pub infobox: Option<InitializerInfobox>,
    /// Existing property to reference
    pub property_id: Option<PropertyId>,
    /// Property to create
    pub property: Option<PropertyInitializer>,
    /// Children to materialize; makes this a group
    pub layers: Option<Vec<Initializer>>,
    /// Existing children to reference; makes this a group
    pub layer_ids: Option<Vec<LayerId>>,
    /// Visibility; defaults to visible
    pub is_visible: Option<bool>,
    /// Dataset schema linked to a group
    pub linked_dataset_schema: Option<DatasetSchemaId>,
    /// Dataset linked to an item
    pub linked_dataset: Option<DatasetId>,
}

/// Declarative description of an infobox
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializerInfobox {
    /// Existing infobox property to reference
    pub property_id: Option<PropertyId>,
    /// Infobox property to create
    pub property: Option<PropertyInitializer>,
    /// Fields in display order
    pub fields: Vec<InitializerInfoboxField>,
}

/// Declarative description of an infobox field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializerInfoboxField {
    /// Explicit id; generated when absent
    pub id: Option<InfoboxFieldId>,
    /// Rendering plugin
    pub plugin: Option<PluginId>,
    /// Rendering extension
    pub extension: Option<PluginExtensionId>,
    /// Existing property to reference
    pub property_id: Option<PropertyId>,
    /// Property to create
    pub property: Option<PropertyInitializer>,
}

/// Output of [`Initializer::layer`]
#[derive(Debug, Clone, PartialEq)]
pub struct InitializerResult {
    /// Id of the top layer
    pub root: LayerId,
    /// Every materialized layer
    pub layers: Map,
    /// Every created property
    pub properties: PropertyMap,
}

impl InitializerResult {
    /// Top layer
    #[must_use]
    pub fn root_layer(&self) -> Option<&Layer> {
        self.layers.layer(&self.root)
    }

    /// Top layer if it is a group
    #[must_use]
    pub fn root_group(&self) -> Option<&Group> {
        self.root_layer().and_then(Layer::as_group)
    }

    /// Top layer if it is an item
    #[must_use]
    pub fn root_item(&self) -> Option<&Item> {
        self.root_layer().and_then(Layer::as_item)
    }
}

impl Initializer {
    /// Materialize the subtree in `scene` with the default configuration
    ///
    /// # Errors
    /// See [`layer_with_config`](Self::layer_with_config).
    pub fn layer(&self, scene: SceneId) -> Result<InitializerResult, InitializerError> {
        self.layer_with_config(scene, &LayerConfig::default())
    }

    /// Materialize the subtree in `scene`
    ///
    /// # Errors
    /// The first property, infobox or build failure, qualified with the
    /// position of the failing node; [`InitializerError::DepthExceeded`]
    /// if children nest deeper than `config.max_depth`.
    pub fn layer_with_config(&self, scene: SceneId, config: &LayerConfig) -> Result<InitializerResult, InitializerError> {
        self.materialize(scene, config, 0)
    }

    fn materialize(&self, scene: SceneId, config: &LayerConfig, depth: usize) -> Result<InitializerResult, InitializerError> {
        if depth > config.max_depth {
            return Err(InitializerError::DepthExceeded(config.max_depth));
        }

        let id = self.id.unwrap_or_else(LayerId::new);
        debug!(layer = %id, scene = %scene, depth, "initializing layer");

        let mut layers = Map::new();
        let mut properties = PropertyMap::new();

        let infobox = match &self.infobox {
            Some(init) => {
                let (infobox, infobox_properties) = init
                    .infobox(scene, config)
                    .map_err(|e| InitializerError::Infobox(Box::new(e)))?;
                properties.merge(infobox_properties);
                Some(infobox)
            }
            None => None,
        };

        let property = match (self.property_id, &self.plugin, &self.extension) {
            (Some(pid), _, _) => Some(pid),
            (None, Some(plugin), Some(extension)) => {
                let schema = PropertySchemaId::from_extension(plugin, extension);
                let p = PropertyInitializer::property_including_empty(self.property.as_ref(), scene, &schema)?;
                let pid = p.id();
                properties.add(p);
                Some(pid)
            }
            (None, _, _) if self.property.is_some() => return Err(InitializerError::PropertyWithoutPlugin),
            _ => None,
        };

        let base = LayerBuilder::new()
            .id(id)
            .scene(scene)
            .name(self.name.clone())
            .visible_opt(self.is_visible)
            .plugin(self.plugin.clone())
            .extension(self.extension.clone())
            .property(property)
            .infobox(infobox);

        let layer: Layer = if let Some(children) = &self.layers {
            let mut ids = IdList::default();
            for (index, child) in children.iter().enumerate() {
                let child_result = child
                    .materialize(scene, config, depth + 1)
                    .map_err(|e| InitializerError::Child {
                        index,
                        source: Box::new(e),
                    })?;
                ids.add_layer(child_result.root, None);
                layers.merge(child_result.layers);
                properties.merge(child_result.properties);
            }
            base.group()
                .layers(ids)
                .linked_dataset_schema(self.linked_dataset_schema)
                .build()?
                .into()
        } else if let Some(existing) = &self.layer_ids {
            base.group()
                .layers(IdList::new(existing.iter().copied()))
                .linked_dataset_schema(self.linked_dataset_schema)
                .build()?
                .into()
        } else {
            base.item().linked_dataset(self.linked_dataset).build()?.into()
        };

        layers.add(layer);
        Ok(InitializerResult {
            root: id,
            layers,
            properties,
        })
    }
}

impl InitializerInfobox {
    /// Build the infobox and the properties it creates
    ///
    /// # Errors
    /// Infobox property failures, or a field failure qualified with its index.
    pub fn infobox(&self, scene: SceneId, config: &LayerConfig) -> Result<(Infobox, PropertyMap), InitializerError> {
        let mut properties = PropertyMap::new();

        let property = match self.property_id {
            Some(pid) => pid,
            None => {
                let p = PropertyInitializer::property_including_empty(
                    self.property.as_ref(),
                    scene,
                    &config.infobox_schema,
                )?;
                let pid = p.id();
                properties.add(p);
                pid
            }
        };

        let mut fields = Vec::with_capacity(self.fields.len());
        for (index, init) in self.fields.iter().enumerate() {
            let (field, created) = init
                .infobox_field(scene)
                .map_err(|e| InitializerError::InfoboxField {
                    index,
                    source: Box::new(e),
                })?;
            fields.push(field);
            if let Some(p) = created {
                properties.add(p);
            }
        }

        Ok((Infobox::new(fields, property), properties))
    }
}

impl InitializerInfoboxField {
    /// Build the field and the property it creates, if any
    ///
    /// # Errors
    /// Property failures, or a field missing its plugin, extension or
    /// property.
    pub fn infobox_field(&self, scene: SceneId) -> Result<(InfoboxField, Option<Property>), InitializerError> {
        let mut created = None;
        let property = match (self.property_id, &self.plugin, &self.extension) {
            (Some(pid), _, _) => Some(pid),
            (None, Some(plugin), Some(extension)) => {
                let schema = PropertySchemaId::from_extension(plugin, extension);
                let p = PropertyInitializer::property_including_empty(self.property.as_ref(), scene, &schema)?;
                let pid = p.id();
                created = Some(p);
                Some(pid)
            }
            _ => None,
        };

        let mut builder = InfoboxField::builder().id(self.id.unwrap_or_else(InfoboxFieldId::new));
        if let Some(plugin) = &self.plugin {
            builder = builder.plugin(plugin.clone());
        }
        if let Some(extension) = &self.extension {
            builder = builder.extension(extension.clone());
        }
        if let Some(property) = property {
            builder = builder.property(property);
        }

        Ok((builder.build()?, created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayerCommon, LayerError};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use strata_property::builtin;

    fn plugin() -> PluginId {
        "marker~1.0.0".parse().unwrap()
    }

    fn ext() -> PluginExtensionId {
        "pin".parse().unwrap()
    }

    #[test]
    fn leaf_becomes_item() {
        let scene = SceneId::new();
        let ds = DatasetId::new();
        let init = Initializer {
            name: "leaf".into(),
            linked_dataset: Some(ds),
            is_visible: Some(false),
            ..Default::default()
        };

        let result = init.layer(scene).unwrap();
        let item = result.root_item().unwrap();
        assert_eq!(item.name(), "leaf");
        assert_eq!(item.scene(), scene);
        assert_eq!(item.linked_dataset(), Some(ds));
        assert!(!item.is_visible());
        assert!(result.properties.is_empty());
    }

    #[test]
    fn explicit_ids_are_kept() {
        let id = LayerId::new();
        let pid = PropertyId::new();
        let init = Initializer {
            id: Some(id),
            plugin: Some(plugin()),
            extension: Some(ext()),
            property_id: Some(pid),
            ..Default::default()
        };

        let result = init.layer(SceneId::new()).unwrap();
        assert_eq!(result.root, id);
        assert_eq!(result.root_layer().and_then(LayerCommon::property), Some(pid));
        assert!(result.properties.is_empty());
    }

    #[test]
    fn plugin_layer_gets_a_property() {
        let init = Initializer {
            plugin: Some(plugin()),
            extension: Some(ext()),
            ..Default::default()
        };

        let result = init.layer(SceneId::new()).unwrap();
        let pid = result.root_layer().and_then(LayerCommon::property).unwrap();
        let property = result.properties.get(&pid).unwrap();
        assert_eq!(property.schema(), &PropertySchemaId::from_extension(&plugin(), &ext()));
    }

    #[test]
    fn property_without_plugin_fails() {
        let init = Initializer {
            property: Some(PropertyInitializer::default()),
            ..Default::default()
        };
        assert!(matches!(
            init.layer(SceneId::new()),
            Err(InitializerError::PropertyWithoutPlugin)
        ));
    }

    #[test]
    fn layer_ids_reference_existing_children() {
        let (a, b) = (LayerId::new(), LayerId::new());
        let init = Initializer {
            layer_ids: Some(vec![a, b]),
            ..Default::default()
        };

        let result = init.layer(SceneId::new()).unwrap();
        assert_eq!(result.layers.len(), 1);
        assert_eq!(result.root_group().unwrap().layers().layers(), vec![a, b]);
    }

    #[test]
    fn infobox_properties_are_created() {
        let init = Initializer {
            infobox: Some(InitializerInfobox {
                fields: vec![InitializerInfoboxField {
                    plugin: Some(plugin()),
                    extension: Some(ext()),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };

        let result = init.layer(SceneId::new()).unwrap();
        let infobox = result.root_layer().and_then(LayerCommon::infobox).unwrap();
        assert_eq!(infobox.count(), 1);
        assert_eq!(result.properties.len(), 2);
        assert_eq!(
            result.properties.get(&infobox.property()).unwrap().schema(),
            &builtin::infobox_schema()
        );
        assert_eq!(
            result.properties.get(&infobox.fields()[0].property()).unwrap().schema(),
            &infobox.fields()[0].schema()
        );
    }

    #[test]
    fn nested_errors_carry_their_path() {
        let init = Initializer {
            layers: Some(vec![
                Initializer::default(),
                Initializer {
                    infobox: Some(InitializerInfobox {
                        fields: vec![InitializerInfoboxField::default()],
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        let err = init.layer(SceneId::new()).unwrap_err();
        assert!(err.to_string().starts_with("layer[1]: infobox: field[0]: "));
        match err {
            InitializerError::Child { index: 1, source } => match *source {
                InitializerError::Infobox(inner) => assert!(matches!(
                    *inner,
                    InitializerError::InfoboxField { index: 0, .. }
                )),
                other => panic!("unexpected: {other}"),
            },
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn self_referencing_layer_ids_fail() {
        let id = LayerId::new();
        let init = Initializer {
            id: Some(id),
            layer_ids: Some(vec![id]),
            ..Default::default()
        };
        match init.layer(SceneId::new()) {
            Err(InitializerError::Layer(e)) => assert!(matches!(*e, LayerError::SelfReference(x) if x == id)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut init = Initializer::default();
        for _ in 0..3 {
            init = Initializer {
                layers: Some(vec![init]),
                ..Default::default()
            };
        }
        let config = LayerConfig::default().with_max_depth(2);
        let err = init.layer_with_config(SceneId::new(), &config).unwrap_err();
        assert!(err.to_string().contains("initializer depth exceeded"));
        assert!(init.layer_with_config(SceneId::new(), &LayerConfig::default().with_max_depth(3)).is_ok());
    }

    #[test]
    fn deserializes_from_manifest_json() {
        let pid = PropertyId::new();
        let value = json!({
            "name": "group",
            "isVisible": false,
            "layers": [{
                "plugin": "marker~1.0.0",
                "extension": "pin",
                "property": { "fields": { "color": "red" } },
                "infobox": { "propertyId": pid.to_string() }
            }]
        });

        let init: Initializer = serde_json::from_value(value).unwrap();
        let result = init.layer(SceneId::new()).unwrap();

        let root = result.root_group().unwrap();
        assert!(!root.is_visible());
        let child = result.layers.item(&root.layers().layer_at(0).unwrap()).unwrap();
        assert_eq!(child.infobox().map(Infobox::property), Some(pid));
        let child_property = result.properties.get(&child.property().unwrap()).unwrap();
        assert_eq!(child_property.field("color"), Some(&json!("red")));
    }
}
