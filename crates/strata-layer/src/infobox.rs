//! Infobox and its plugin-rendered fields
//!
//! An [`Infobox`] owns its own property (built-in infobox schema) plus an
//! ordered list of [`InfoboxField`]s. Each field is rendered by a plugin
//! extension and bound to a property of that extension's schema.
//!
//! Field ids are unique within an infobox. Adding a field whose id is
//! already present is ignored, the same way [`IdList`](crate::IdList)
//! ignores duplicate layer ids.

use crate::{LayerError, ValidationError};
use std::collections::HashSet;
use strata_id::{InfoboxFieldId, PluginExtensionId, PluginId, PropertyId, PropertySchemaId};
use strata_property::PropertyMap;

/// A single infobox field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoboxField {
    id: InfoboxFieldId,
    plugin: PluginId,
    extension: PluginExtensionId,
    property: PropertyId,
}

impl InfoboxField {
    /// Start building a field
    #[inline]
    #[must_use]
    pub fn builder() -> InfoboxFieldBuilder {
        InfoboxFieldBuilder::default()
    }

    /// Field id
    #[inline]
    #[must_use]
    pub fn id(&self) -> InfoboxFieldId {
        self.id
    }

    /// Rendering plugin
    #[inline]
    #[must_use]
    pub fn plugin(&self) -> &PluginId {
        &self.plugin
    }

    /// Rendering extension
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &PluginExtensionId {
        &self.extension
    }

    /// Bound property
    #[inline]
    #[must_use]
    pub fn property(&self) -> PropertyId {
        self.property
    }

    /// Schema the bound property must have
    #[inline]
    #[must_use]
    pub fn schema(&self) -> PropertySchemaId {
        PropertySchemaId::from_extension(&self.plugin, &self.extension)
    }

    /// Replace the rendering plugin (e.g. after a plugin upgrade)
    pub fn set_plugin(&mut self, plugin: PluginId) {
        self.plugin = plugin;
    }

    /// Check the bound property exists and has the extension's schema
    ///
    /// # Errors
    /// [`ValidationError::PropertyNotFound`] or [`ValidationError::InvalidSchema`].
    pub fn validate_property(&self, catalog: &PropertyMap) -> Result<(), ValidationError> {
        let property = catalog
            .get(&self.property)
            .ok_or(ValidationError::PropertyNotFound(self.property))?;
        let expected = self.schema();
        if property.schema() != &expected {
            return Err(ValidationError::InvalidSchema {
                property: self.property,
                expected,
                actual: property.schema().clone(),
            });
        }
        Ok(())
    }
}

/// Builder for [`InfoboxField`]
#[derive(Debug, Clone, Default)]
pub struct InfoboxFieldBuilder {
    id: Option<InfoboxFieldId>,
    plugin: Option<PluginId>,
    extension: Option<PluginExtensionId>,
    property: Option<PropertyId>,
}

impl InfoboxFieldBuilder {
    /// Explicit id
    #[inline]
    #[must_use]
    pub fn id(mut self, id: InfoboxFieldId) -> Self {
        self.id = Some(id);
        self
    }

    /// Generate an id
    #[inline]
    #[must_use]
    pub fn new_id(mut self) -> Self {
        self.id = Some(InfoboxFieldId::new());
        self
    }

    /// Rendering plugin
    #[inline]
    #[must_use]
    pub fn plugin(mut self, plugin: PluginId) -> Self {
        self.plugin = Some(plugin);
        self
    }

    /// Rendering extension
    #[inline]
    #[must_use]
    pub fn extension(mut self, extension: PluginExtensionId) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Bound property
    #[inline]
    #[must_use]
    pub fn property(mut self, property: PropertyId) -> Self {
        self.property = Some(property);
        self
    }

    /// Build the field
    ///
    /// # Errors
    /// [`LayerError::InvalidInfoboxField`] naming the first missing part.
    pub fn build(self) -> Result<InfoboxField, LayerError> {
        Ok(InfoboxField {
            id: self.id.ok_or(LayerError::InvalidInfoboxField("id"))?,
            plugin: self.plugin.ok_or(LayerError::InvalidInfoboxField("plugin"))?,
            extension: self
                .extension
                .ok_or(LayerError::InvalidInfoboxField("extension"))?,
            property: self
                .property
                .ok_or(LayerError::InvalidInfoboxField("property"))?,
        })
    }

    /// Build the field, panicking on missing parts
    ///
    /// # Panics
    /// Panics if [`build`](Self::build) fails.
    #[must_use]
    pub fn must_build(self) -> InfoboxField {
        match self.build() {
            Ok(f) => f,
            Err(e) => panic!("infobox field build failed: {e}"),
        }
    }
}

/// Ordered, duplicate-free collection of infobox fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Infobox {
    property: PropertyId,
    fields: Vec<InfoboxField>,
    ids: HashSet<InfoboxFieldId>,
}

impl Infobox {
    /// Create an infobox; fields with an already-seen id are dropped
    #[must_use]
    pub fn new(fields: impl IntoIterator<Item = InfoboxField>, property: PropertyId) -> Self {
        let mut infobox = Self {
            property,
            fields: Vec::new(),
            ids: HashSet::new(),
        };
        for field in fields {
            infobox.add(field, None);
        }
        infobox
    }

    /// The infobox's own property
    #[inline]
    #[must_use]
    pub fn property(&self) -> PropertyId {
        self.property
    }

    /// Fields in order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[InfoboxField] {
        &self.fields
    }

    /// Lookup a field by id
    #[must_use]
    pub fn field(&self, id: &InfoboxFieldId) -> Option<&InfoboxField> {
        if !self.has(id) {
            return None;
        }
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Mutable lookup by id
    pub fn field_mut(&mut self, id: &InfoboxFieldId) -> Option<&mut InfoboxField> {
        self.fields.iter_mut().find(|f| &f.id == id)
    }

    /// Field at `index`
    #[inline]
    #[must_use]
    pub fn field_at(&self, index: usize) -> Option<&InfoboxField> {
        self.fields.get(index)
    }

    /// Fields rendered by `plugin` (and `extension`, if given)
    #[must_use]
    pub fn fields_by_plugin(
        &self,
        plugin: &PluginId,
        extension: Option<&PluginExtensionId>,
    ) -> Vec<&InfoboxField> {
        self.fields
            .iter()
            .filter(|f| Self::matches(f, plugin, extension))
            .collect()
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn has(&self, id: &InfoboxFieldId) -> bool {
        self.ids.contains(id)
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.fields.len()
    }

    /// Check if there are no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Insert `field` at `index`; `None` or out-of-range appends
    ///
    /// Returns `false` and leaves the infobox untouched if a field with the
    /// same id already exists.
    pub fn add(&mut self, field: InfoboxField, index: Option<usize>) -> bool {
        if !self.ids.insert(field.id) {
            return false;
        }
        match index {
            Some(i) if i < self.fields.len() => self.fields.insert(i, field),
            _ => self.fields.push(field),
        }
        true
    }

    /// Move field `id` to `to_index`, clamped to the last position
    pub fn move_field(&mut self, id: &InfoboxFieldId, to_index: usize) {
        if let Some(from) = self.fields.iter().position(|f| &f.id == id) {
            self.move_at(from, to_index);
        }
    }

    /// Move the field at `from_index` to `to_index`, clamped to the last position
    pub fn move_at(&mut self, from_index: usize, to_index: usize) {
        let len = self.fields.len();
        if from_index >= len {
            return;
        }
        let to_index = to_index.min(len - 1);
        if from_index == to_index {
            return;
        }
        let field = self.fields.remove(from_index);
        self.fields.insert(to_index, field);
    }

    /// Remove field `id`
    pub fn remove(&mut self, id: &InfoboxFieldId) -> Option<InfoboxField> {
        if !self.ids.remove(id) {
            return None;
        }
        let pos = self.fields.iter().position(|f| &f.id == id)?;
        Some(self.fields.remove(pos))
    }

    /// Remove the field at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<InfoboxField> {
        if index >= self.fields.len() {
            return None;
        }
        let field = self.fields.remove(index);
        self.ids.remove(&field.id);
        Some(field)
    }

    /// Remove every field rendered by `plugin` (and `extension`, if given)
    ///
    /// Returns the properties of the removed fields in their original order.
    pub fn remove_all_by_plugin(
        &mut self,
        plugin: &PluginId,
        extension: Option<&PluginExtensionId>,
    ) -> Vec<PropertyId> {
        let mut removed = Vec::new();
        let ids = &mut self.ids;
        self.fields.retain(|f| {
            if Self::matches(f, plugin, extension) {
                ids.remove(&f.id);
                removed.push(f.property);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Validate the infobox property and every field against `catalog`
    ///
    /// The infobox's own property only has to exist; each field's property
    /// must also carry its extension's schema.
    ///
    /// # Errors
    /// The first failure, qualified with the field position and id.
    pub fn validate_properties(&self, catalog: &PropertyMap) -> Result<(), ValidationError> {
        if !catalog.contains(&self.property) {
            return Err(ValidationError::PropertyNotFound(self.property));
        }
        for (index, field) in self.fields.iter().enumerate() {
            field
                .validate_property(catalog)
                .map_err(|e| ValidationError::Field {
                    index,
                    id: field.id,
                    source: Box::new(e),
                })?;
        }
        Ok(())
    }

    fn matches(field: &InfoboxField, plugin: &PluginId, extension: Option<&PluginExtensionId>) -> bool {
        &field.plugin == plugin && extension.map_or(true, |e| &field.extension == e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use strata_id::SceneId;
    use strata_property::{builtin, Property};

    fn plugin(name: &str) -> PluginId {
        format!("{name}~1.0.0").parse().unwrap()
    }

    fn ext(name: &str) -> PluginExtensionId {
        PluginExtensionId::new(name).unwrap()
    }

    fn field(p: &PluginId, e: &str) -> InfoboxField {
        InfoboxField::builder()
            .new_id()
            .plugin(p.clone())
            .extension(ext(e))
            .property(PropertyId::new())
            .must_build()
    }

    #[test]
    fn field_builder_requires_all_parts() {
        let err = InfoboxField::builder()
            .new_id()
            .plugin(plugin("a"))
            .property(PropertyId::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, LayerError::InvalidInfoboxField("extension")));
    }

    #[test]
    fn queries() {
        let p = plugin("a");
        let f1 = field(&p, "x");
        let f2 = field(&p, "y");
        let ib = Infobox::new([f1.clone(), f2.clone()], PropertyId::new());

        assert_eq!(ib.count(), 2);
        assert!(ib.has(&f1.id()));
        assert_eq!(ib.field(&f2.id()), Some(&f2));
        assert_eq!(ib.field_at(0), Some(&f1));
        assert_eq!(ib.field_at(2), None);
        assert_eq!(ib.fields_by_plugin(&p, Some(&ext("y"))), vec![&f2]);
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let p = plugin("a");
        let f1 = field(&p, "x");
        let mut ib = Infobox::new([f1.clone()], PropertyId::new());

        assert!(!ib.add(f1.clone(), Some(0)));
        assert_eq!(ib.count(), 1);

        let f2 = field(&p, "y");
        assert!(ib.add(f2.clone(), Some(0)));
        assert_eq!(ib.fields(), &[f2, f1]);
    }

    #[test]
    fn new_drops_duplicate_ids() {
        let f = field(&plugin("a"), "x");
        let ib = Infobox::new([f.clone(), f], PropertyId::new());
        assert_eq!(ib.count(), 1);
    }

    #[test]
    fn move_and_remove() {
        let p = plugin("a");
        let (f1, f2, f3) = (field(&p, "x"), field(&p, "y"), field(&p, "z"));
        let mut ib = Infobox::new([f1.clone(), f2.clone(), f3.clone()], PropertyId::new());

        ib.move_field(&f1.id(), 100);
        assert_eq!(ib.fields(), &[f2.clone(), f3.clone(), f1.clone()]);

        assert_eq!(ib.remove(&f3.id()), Some(f3.clone()));
        assert!(!ib.has(&f3.id()));
        assert_eq!(ib.remove(&f3.id()), None);

        assert_eq!(ib.remove_at(0), Some(f2));
        assert_eq!(ib.fields(), &[f1]);
    }

    #[test]
    fn remove_all_by_plugin_returns_properties_in_order() {
        let p1 = plugin("p1");
        let p2 = plugin("p2");
        let (f1, f2, f3) = (field(&p1, "x"), field(&p2, "x"), field(&p1, "y"));
        let mut ib = Infobox::new([f1.clone(), f2.clone(), f3.clone()], PropertyId::new());

        let removed = ib.remove_all_by_plugin(&p1, None);
        assert_eq!(removed, vec![f1.property(), f3.property()]);
        assert_eq!(ib.fields(), &[f2.clone()]);
        assert!(!ib.has(&f1.id()));

        assert!(ib.remove_all_by_plugin(&p1, None).is_empty());
        assert_eq!(ib.fields(), &[f2]);
    }

    #[test]
    fn remove_all_by_plugin_with_extension_filter() {
        let p = plugin("p");
        let (f1, f2) = (field(&p, "x"), field(&p, "y"));
        let mut ib = Infobox::new([f1.clone(), f2.clone()], PropertyId::new());

        assert_eq!(ib.remove_all_by_plugin(&p, Some(&ext("y"))), vec![f2.property()]);
        assert_eq!(ib.fields(), &[f1]);
    }

    #[test]
    fn validate_properties() {
        let scene = SceneId::new();
        let p = plugin("a");
        let f = field(&p, "x");
        let ib_prop = Property::builder()
            .new_id()
            .scene(scene)
            .schema(builtin::infobox_schema())
            .must_build();
        let field_prop = Property::builder()
            .id(f.property())
            .scene(scene)
            .schema(f.schema())
            .must_build();
        let ib = Infobox::new([f.clone()], ib_prop.id());

        let mut catalog = PropertyMap::new().with(ib_prop.clone());
        assert!(matches!(
            ib.validate_properties(&catalog),
            Err(ValidationError::Field { index: 0, .. })
        ));

        catalog.add(field_prop);
        assert_eq!(ib.validate_properties(&catalog), Ok(()));

        let wrong = Property::builder()
            .id(f.property())
            .scene(scene)
            .schema(builtin::infobox_schema())
            .must_build();
        catalog.add(wrong);
        let err = ib.validate_properties(&catalog).unwrap_err();
        match err {
            ValidationError::Field { source, .. } => {
                assert!(matches!(*source, ValidationError::InvalidSchema { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(
            ib.validate_properties(&PropertyMap::new()),
            Err(ValidationError::PropertyNotFound(ib_prop.id()))
        );
    }

    proptest! {
        #[test]
        fn prop_remove_all_by_plugin_partitions(owners in proptest::collection::vec(0..3u8, 0..12)) {
            let plugins = [plugin("p0"), plugin("p1"), plugin("p2")];
            let fields: Vec<_> = owners
                .iter()
                .map(|o| field(&plugins[*o as usize], "x"))
                .collect();
            let mut ib = Infobox::new(fields.clone(), PropertyId::new());

            let removed = ib.remove_all_by_plugin(&plugins[0], None);
            let expected: Vec<_> = fields
                .iter()
                .filter(|f| f.plugin() == &plugins[0])
                .map(InfoboxField::property)
                .collect();

            prop_assert_eq!(removed, expected);
            prop_assert!(ib.fields().iter().all(|f| f.plugin() != &plugins[0]));
            prop_assert_eq!(ib.count(), ib.ids.len());
        }
    }
}
