use strata_id::SceneId;
use strata_layer::{LayerCommon, ValidationError};
use strata_test_utils::{catalog_for, infobox, infobox_field, item, plugin_id};

#[test]
fn test_item_with_infobox_validates_against_its_catalog() {
    let plugin = plugin_id("marker");
    let mut layer = item(SceneId::new(), Some(&plugin));
    layer.set_infobox(Some(infobox([infobox_field(&plugin), infobox_field(&plugin)])));

    let catalog = catalog_for(&layer);
    assert_eq!(catalog.len(), 4);
    assert!(layer.validate_properties(&catalog).is_ok());
}

#[test]
fn test_missing_field_property_is_reported_with_its_index() {
    let plugin = plugin_id("marker");
    let mut layer = item(SceneId::new(), Some(&plugin));
    let second = infobox_field(&plugin);
    let missing = second.property();
    layer.set_infobox(Some(infobox([infobox_field(&plugin), second])));

    let mut catalog = catalog_for(&layer);
    catalog.remove(&missing);

    let err = layer.validate_properties(&catalog).unwrap_err();
    let ValidationError::Infobox(inner) = err else {
        panic!("expected infobox error, got {err:?}");
    };
    assert!(matches!(
        *inner,
        ValidationError::Field { index: 1, ref source, .. } if matches!(**source, ValidationError::PropertyNotFound(id) if id == missing)
    ));
}

#[test]
fn test_property_without_plugin_binding_is_rejected() {
    let layer = item(SceneId::new(), None);
    let catalog = catalog_for(&layer);
    assert!(catalog.is_empty());
    assert!(matches!(
        layer.validate_properties(&catalog),
        Err(ValidationError::MissingPluginBinding)
    ));
}
