//! Group layers
//!
//! A [`Group`] owns an ordered set of child layer ids. It can be linked to a
//! dataset schema, in which case its children are generated per dataset
//! record, and it may be the root layer of a scene.

use crate::builder::forward_base_setters;
use crate::{IdList, LayerBase, LayerBuilder, LayerCommon, LayerError};
use strata_id::{DatasetSchemaId, LayerId};

/// Layer containing other layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    base: LayerBase,
    layers: IdList,
    linked_dataset_schema: Option<DatasetSchemaId>,
    root: bool,
}

impl Group {
    /// Start building a group
    #[inline]
    #[must_use]
    pub fn builder() -> GroupBuilder {
        LayerBuilder::new().group()
    }

    /// Child layer ids
    #[inline]
    #[must_use]
    pub fn layers(&self) -> &IdList {
        &self.layers
    }

    /// Whether this is the scene's root layer
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Linked dataset schema
    #[inline]
    #[must_use]
    pub fn linked_dataset_schema(&self) -> Option<DatasetSchemaId> {
        self.linked_dataset_schema
    }

    /// Whether a dataset schema is linked
    #[inline]
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.linked_dataset_schema.is_some()
    }

    /// Link a dataset schema
    pub fn link(&mut self, schema: DatasetSchemaId) {
        self.linked_dataset_schema = Some(schema);
    }

    /// Remove the dataset schema link
    pub fn unlink(&mut self) {
        self.linked_dataset_schema = None;
    }

    /// Add a child at `index` (`None` appends); a group never contains itself
    pub fn add_layer(&mut self, id: LayerId, index: Option<usize>) {
        if id != self.base.id {
            self.layers.add_layer(id, index);
        }
    }

    /// Add a child if absent, otherwise move it to `index`
    pub fn add_or_move_layer(&mut self, id: LayerId, index: Option<usize>) {
        if id != self.base.id {
            self.layers.add_or_move_layer(id, index);
        }
    }

    /// Reorder a child, clamping to the last position
    pub fn move_layer(&mut self, id: &LayerId, index: usize) {
        self.layers.move_layer(id, index);
    }

    /// Remove a child; returns whether it was present
    pub fn remove_layer(&mut self, id: &LayerId) -> bool {
        self.layers.remove_layer(id)
    }

    /// Move child `id` into this group at `index`
    ///
    /// With no source group, or a source with this group's id, this is a
    /// plain reorder. Otherwise the child is removed from `from` and
    /// added here; both groups are updated before returning. Moving the
    /// group into itself leaves both groups untouched.
    pub fn move_layer_from(&mut self, id: LayerId, index: usize, from: Option<&mut Group>) {
        if id == self.base.id {
            return;
        }
        match from {
            Some(from) if from.id() != self.id() => {
                from.remove_layer(&id);
                self.add_layer(id, Some(index));
            }
            _ => self.move_layer(&id, index),
        }
    }
}

impl LayerCommon for Group {
    fn base(&self) -> &LayerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LayerBase {
        &mut self.base
    }
}

/// Builder for [`Group`]
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    base: LayerBuilder,
    layers: IdList,
    linked_dataset_schema: Option<DatasetSchemaId>,
    root: bool,
}

impl GroupBuilder {
    pub(crate) fn from_base(base: LayerBuilder) -> Self {
        Self {
            base,
            layers: IdList::default(),
            linked_dataset_schema: None,
            root: false,
        }
    }

    forward_base_setters!();

    /// Child layer ids
    #[inline]
    #[must_use]
    pub fn layers(mut self, layers: IdList) -> Self {
        self.layers = layers;
        self
    }

    /// Linked dataset schema
    #[inline]
    #[must_use]
    pub fn linked_dataset_schema(mut self, schema: Option<DatasetSchemaId>) -> Self {
        self.linked_dataset_schema = schema;
        self
    }

    /// Root flag
    #[inline]
    #[must_use]
    pub fn root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    /// Build the group
    ///
    /// # Errors
    /// Missing id or scene, or a child list containing the group itself.
    pub fn build(self) -> Result<Group, LayerError> {
        let base = self.base.build_base()?;
        if self.layers.has_layer(&base.id) {
            return Err(LayerError::SelfReference(base.id));
        }
        Ok(Group {
            base,
            layers: self.layers,
            linked_dataset_schema: self.linked_dataset_schema,
            root: self.root,
        })
    }

    /// Build the group, panicking on failure
    ///
    /// # Panics
    /// Panics if [`build`](Self::build) fails.
    #[must_use]
    pub fn must_build(self) -> Group {
        match self.build() {
            Ok(g) => g,
            Err(e) => panic!("group build failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strata_id::{SceneId, TagId};

    fn group(scene: SceneId, children: &[LayerId]) -> Group {
        Group::builder()
            .new_id()
            .scene(scene)
            .layers(IdList::new(children.iter().copied()))
            .must_build()
    }

    #[test]
    fn build_rejects_self_reference() {
        let id = LayerId::new();
        let err = Group::builder()
            .id(id)
            .scene(SceneId::new())
            .layers(IdList::new([id]))
            .build()
            .unwrap_err();
        assert!(matches!(err, LayerError::SelfReference(x) if x == id));
    }

    #[test]
    fn empty_group_has_empty_layers() {
        let g = group(SceneId::new(), &[]);
        assert!(g.layers().is_empty());
        assert!(!g.is_root());
    }

    #[test]
    fn add_layer_ignores_self() {
        let mut g = group(SceneId::new(), &[]);
        let own = g.id();
        g.add_layer(own, None);
        g.add_or_move_layer(own, Some(0));
        assert!(g.layers().is_empty());
    }

    #[test]
    fn move_layer_from_reorders_within_group() {
        let ids: Vec<_> = (0..3).map(|_| LayerId::new()).collect();
        let mut g = group(SceneId::new(), &ids);

        g.move_layer_from(ids[0], 2, None);
        assert_eq!(g.layers().layers(), vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn move_layer_from_same_id_group_reorders() {
        let ids: Vec<_> = (0..2).map(|_| LayerId::new()).collect();
        let mut g = group(SceneId::new(), &ids);
        let mut same = g.clone();

        g.move_layer_from(ids[1], 0, Some(&mut same));
        assert_eq!(g.layers().layers(), vec![ids[1], ids[0]]);
        assert_eq!(same.layers().layers(), ids);
    }

    #[test]
    fn move_layer_from_other_group_reparents() {
        let scene = SceneId::new();
        let a: Vec<_> = (0..2).map(|_| LayerId::new()).collect();
        let b: Vec<_> = (0..2).map(|_| LayerId::new()).collect();
        let mut from = group(scene, &a);
        let mut to = group(scene, &b);

        to.move_layer_from(a[0], 1, Some(&mut from));

        assert_eq!(from.layers().layers(), vec![a[1]]);
        assert_eq!(to.layers().layers(), vec![b[0], a[0], b[1]]);
    }

    #[test]
    fn move_layer_from_rejects_moving_group_into_itself() {
        let scene = SceneId::new();
        let mut to = group(scene, &[LayerId::new()]);
        let mut from = group(scene, &[to.id()]);

        to.move_layer_from(to.id(), 0, Some(&mut from));

        assert!(from.layers().has_layer(&to.id()));
        assert!(!to.layers().has_layer(&to.id()));
        assert_eq!(to.layers().layer_count(), 1);
    }

    #[test]
    fn link_and_unlink() {
        let mut g = group(SceneId::new(), &[]);
        let schema = DatasetSchemaId::new();
        assert!(!g.is_linked());

        g.link(schema);
        assert_eq!(g.linked_dataset_schema(), Some(schema));
        assert!(g.is_linked());

        g.unlink();
        assert_eq!(g.linked_dataset_schema(), None);
    }

    #[test]
    fn tag_attach_and_detach() {
        let mut g = group(SceneId::new(), &[]);
        let tag = TagId::new();

        g.attach_tag(tag).unwrap();
        assert!(matches!(g.attach_tag(tag), Err(LayerError::DuplicateTag(t)) if t == tag));

        g.detach_tag(tag).unwrap();
        assert!(matches!(g.detach_tag(tag), Err(LayerError::TagNotFound(t)) if t == tag));
    }

    #[test]
    fn setters() {
        let mut g = group(SceneId::new(), &[]);
        g.rename("renamed");
        g.set_visible(false);
        assert_eq!(g.name(), "renamed");
        assert!(!g.is_visible());
        assert!(!g.uses_plugin());
        assert!(g.properties().is_empty());
    }
}
