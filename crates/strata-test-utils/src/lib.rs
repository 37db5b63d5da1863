//! Testing utilities for the strata workspace
//!
//! Shared fixtures for building layer trees and the tracing setup used by
//! integration tests.

#![allow(missing_docs)]

use strata_id::{PluginExtensionId, PluginId, PropertyId, PropertySchemaId, SceneId};
use strata_layer::{Group, IdList, Infobox, InfoboxField, Item, Layer, LayerCommon, Map};
use strata_plugin::{ExtensionKind, Plugin};
use strata_property::{builtin, Property, PropertyMap};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honoring `RUST_LOG`; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn plugin_id(name: &str) -> PluginId {
    PluginId::new(name, Some("1.0.0")).unwrap()
}

pub fn extension_id(name: &str) -> PluginExtensionId {
    PluginExtensionId::new(name).unwrap()
}

/// Plugin with a primitive `marker` and a `panel` block extension
pub fn marker_plugin(name: &str) -> Plugin {
    Plugin::new(plugin_id(name), name)
        .with_extension(extension_id("marker"), ExtensionKind::Primitive)
        .with_extension(extension_id("panel"), ExtensionKind::Block)
}

pub fn infobox_field(plugin: &PluginId) -> InfoboxField {
    InfoboxField::builder()
        .new_id()
        .plugin(plugin.clone())
        .extension(extension_id("panel"))
        .property(PropertyId::new())
        .must_build()
}

pub fn infobox(fields: impl IntoIterator<Item = InfoboxField>) -> Infobox {
    Infobox::new(fields, PropertyId::new())
}

/// Item with its own property, rendered by `plugin`'s marker when given
pub fn item(scene: SceneId, plugin: Option<&PluginId>) -> Item {
    Item::builder()
        .new_id()
        .scene(scene)
        .plugin(plugin.cloned())
        .extension(plugin.map(|_| extension_id("marker")))
        .property(Some(PropertyId::new()))
        .must_build()
}

pub fn group(scene: SceneId, children: &[&dyn LayerCommon]) -> Group {
    Group::builder()
        .new_id()
        .scene(scene)
        .layers(children.iter().map(|c| c.id()).collect::<IdList>())
        .must_build()
}

pub fn map(layers: impl IntoIterator<Item = Layer>) -> Map {
    layers.into_iter().collect()
}

/// Catalog holding a correctly-typed property for every property of `layer`
pub fn catalog_for(layer: &dyn LayerCommon) -> PropertyMap {
    let mut catalog = PropertyMap::new();
    let mut add = |id: PropertyId, schema: PropertySchemaId| {
        catalog.add(
            Property::builder()
                .id(id)
                .scene(layer.scene())
                .schema(schema)
                .must_build(),
        );
    };

    if let (Some(id), Some(plugin), Some(ext)) = (layer.property(), layer.plugin(), layer.extension()) {
        add(id, PropertySchemaId::from_extension(plugin, ext));
    }
    if let Some(infobox) = layer.infobox() {
        add(infobox.property(), builtin::infobox_schema());
        for field in infobox.fields() {
            add(field.property(), field.schema());
        }
    }
    catalog
}
