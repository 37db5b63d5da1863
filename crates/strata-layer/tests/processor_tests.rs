use pretty_assertions::assert_eq;
use strata_id::SceneId;
use strata_layer::ops::{LayerItem, Processor};
use strata_layer::{IdList, Layer, LayerCommon, LayerConfig, LayerError, Map};
use strata_test_utils::{group, infobox, infobox_field, init_tracing, item, map, marker_plugin, plugin_id};

#[tokio::test]
async fn test_uninstall_removes_bound_child_and_strips_sibling() {
    init_tracing();
    let scene = SceneId::new();
    let target = plugin_id("target");

    let mut child = item(scene, Some(&target));
    child.set_infobox(Some(infobox([infobox_field(&target)])));
    let mut sibling = item(scene, None);
    let sibling_field = infobox_field(&target);
    sibling.set_infobox(Some(infobox([sibling_field.clone()])));
    let parent = group(scene, &[&child, &sibling]);

    let layers = map([parent.clone().into(), child.clone().into(), sibling.clone().into()]);
    let result = Processor::new(parent.id(), layers)
        .uninstall_plugin(&target)
        .await
        .unwrap();

    assert_eq!(result.removed_layers.layers(), vec![child.id()]);

    let mut expected = child.properties();
    expected.push(sibling_field.property());
    assert_eq!(result.removed_properties, expected);
    assert!(result.removed_properties.contains(&child.property().unwrap()));

    assert_eq!(result.modified_layers.ids().layers(), vec![parent.id(), sibling.id()]);
    let parent_after = result.modified_layers.find(&parent.id()).and_then(Layer::as_group).unwrap();
    assert_eq!(parent_after.layers().layers(), vec![sibling.id()]);
    let sibling_after = result.modified_layers.find(&sibling.id()).unwrap();
    assert!(sibling_after.infobox().unwrap().is_empty());
}

#[tokio::test]
async fn test_modified_group_keeps_every_change() {
    init_tracing();
    let scene = SceneId::new();
    let target = plugin_id("target");

    let doomed_a = item(scene, Some(&target));
    let doomed_b = item(scene, Some(&target));
    let keeper = item(scene, Some(&plugin_id("other")));
    let mut parent = group(scene, &[&doomed_a, &keeper, &doomed_b]);
    parent.set_infobox(Some(infobox([infobox_field(&target)])));
    let root = group(scene, &[&parent]);

    let layers = map([
        root.clone().into(),
        parent.clone().into(),
        doomed_a.clone().into(),
        doomed_b.clone().into(),
        keeper.clone().into(),
    ]);
    let result = Processor::new(root.id(), layers)
        .uninstall_plugin(&target)
        .await
        .unwrap();

    assert_eq!(result.modified_layers.len(), 1);
    let parent_after = result.modified_layers.find(&parent.id()).and_then(Layer::as_group).unwrap();
    assert_eq!(parent_after.layers(), &IdList::new([keeper.id()]));
    assert!(parent_after.infobox().unwrap().is_empty());
    assert_eq!(result.removed_layers.layers(), vec![doomed_a.id(), doomed_b.id()]);
}

#[tokio::test]
async fn test_uninstall_respects_depth_limit() {
    let scene = SceneId::new();
    let leaf = item(scene, None);
    let mid = group(scene, &[&leaf]);
    let root = group(scene, &[&mid]);
    let layers: Map = map([root.clone().into(), mid.into(), leaf.into()]);

    let processor = Processor::with_config(root.id(), layers, LayerConfig::default().with_max_depth(1));
    let err = processor.uninstall_plugin(&plugin_id("any")).await.unwrap_err();
    assert!(matches!(err, LayerError::DepthExceeded(1)));
}

#[tokio::test]
async fn test_items_created_from_plugin_are_uninstalled() {
    let scene = SceneId::new();
    let plugin = marker_plugin("pins");
    let (pin, property) = LayerItem::new(scene)
        .with_extension(&plugin, "marker".parse().unwrap())
        .with_name("pin")
        .initialize()
        .unwrap();
    let root = group(scene, &[&pin]);

    let layers = map([root.clone().into(), pin.clone().into()]);
    let result = Processor::new(root.id(), layers)
        .uninstall_plugin(plugin.id())
        .await
        .unwrap();

    assert_eq!(result.removed_layers.layers(), vec![pin.id()]);
    assert_eq!(result.removed_properties, vec![property.unwrap().id()]);
}
